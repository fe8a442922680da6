//! Report-Pager CLI (for diagnostics only)
//! The main interface is through WASM bindings.

use clap::{Parser, ValueEnum};
use report_pager::estimator::breakdown;
use report_pager::{ContentMetrics, PageDimensions, PageEstimator, PagerConfig, PaperSize};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Paper {
    Letter,
    A4,
    Legal,
}

impl From<Paper> for PaperSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::Letter => PaperSize::Letter,
            Paper::A4 => PaperSize::A4,
            Paper::Legal => PaperSize::Legal,
        }
    }
}

/// Estimate how many printed pages a report will take
#[derive(Debug, Parser)]
#[command(name = "report-pager", version)]
struct Args {
    /// Full scrollable content height in CSS pixels
    #[arg(long)]
    height: f64,

    /// Elements marked `explicit-break`
    #[arg(long, default_value_t = 0)]
    explicit_breaks: usize,

    /// Elements marked `avoid-break`
    #[arg(long, default_value_t = 0)]
    avoid_breaks: usize,

    /// Derive the page budget from a paper size instead of the config
    #[arg(long, value_enum)]
    paper: Option<Paper>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log estimator details
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> report_pager::Result<PagerConfig> {
    let mut config = match &args.config {
        Some(path) => PagerConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => PagerConfig::default(),
    };

    if let Some(paper) = args.paper {
        let derived = PageDimensions::for_paper(paper.into()).geometry();
        config.geometry.available_page_height = derived.available_page_height;
        config.validate()?;
    }

    Ok(config)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let metrics = ContentMetrics::new(args.height, args.explicit_breaks, args.avoid_breaks);
    let terms = breakdown(&metrics, &config.geometry);
    let info = PageEstimator::new(config.geometry).estimate_metrics(&metrics);

    println!("Report-Pager estimate");
    println!("=====================");
    println!(
        "  page budget:        {} px",
        config.geometry.available_page_height
    );
    println!("  pages by height:    {}", terms.raw_pages);
    println!("  explicit breaks:    {}", terms.explicit_breaks);
    println!("  avoid-break buffer: {}", terms.avoid_break_buffer);
    if terms.clamped() {
        println!(
            "  clamped from {} to the {} page ceiling",
            terms.unclamped, config.geometry.max_pages
        );
    }
    println!();
    println!("{info}");

    ExitCode::SUCCESS
}
