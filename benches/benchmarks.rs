//! Benchmarks for the pagination core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use report_pager::{
    estimate_total_pages, ContentChange, ContentMetrics, ManualFeed, PageGeometry, Paginator,
};

fn bench_estimate(c: &mut Criterion) {
    let geometry = PageGeometry::default();
    let metrics = ContentMetrics::new(14_250.0, 4, 37);

    c.bench_function("estimate_total_pages", |b| {
        b.iter(|| estimate_total_pages(black_box(&metrics), black_box(&geometry)));
    });
}

fn bench_mutation_burst(c: &mut Criterion) {
    c.bench_function("mutation_burst_100", |b| {
        let mut paginator: Paginator<ContentMetrics, ManualFeed> = Paginator::default();
        paginator
            .mount(ContentMetrics::new(5_000.0, 2, 10), ManualFeed, 0)
            .unwrap();
        let mut now = 0;

        b.iter(|| {
            for _ in 0..100 {
                now += 1;
                paginator.handle_change(black_box(&ContentChange::ChildList), now);
            }
            now += 150;
            black_box(paginator.poll(now));
        });
    });
}

fn bench_recompute(c: &mut Criterion) {
    c.bench_function("recompute", |b| {
        let mut paginator: Paginator<ContentMetrics, ManualFeed> = Paginator::default();
        paginator
            .mount(ContentMetrics::new(5_000.0, 2, 10), ManualFeed, 0)
            .unwrap();

        b.iter(|| {
            black_box(paginator.recompute());
        });
    });
}

criterion_group!(benches, bench_estimate, bench_mutation_burst, bench_recompute);

criterion_main!(benches);
