//! Page count heuristic

use super::source::{ContentMetrics, ContentSource};
use crate::geometry::PageGeometry;
use crate::state::PaginationInfo;

/// Intermediate terms of one estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateBreakdown {
    /// Pages needed by height alone
    pub raw_pages: u32,
    pub explicit_breaks: u32,
    pub avoid_break_buffer: u32,
    /// Sum before applying the page ceiling (at least 1)
    pub unclamped: u32,
    pub total_pages: u32,
}

impl EstimateBreakdown {
    /// Whether the page ceiling cut the estimate
    pub fn clamped(&self) -> bool {
        self.unclamped > self.total_pages
    }
}

/// Compute every term of the estimate. Arithmetic saturates.
pub fn breakdown(metrics: &ContentMetrics, geometry: &PageGeometry) -> EstimateBreakdown {
    // float -> int casts saturate, NaN becomes 0
    let raw_pages = (metrics.normalized_height() / geometry.available_page_height).ceil() as u32;
    let explicit_breaks = u32::try_from(metrics.explicit_breaks).unwrap_or(u32::MAX);
    let avoid_break_buffer =
        (metrics.avoid_breaks as f64 * geometry.avoid_break_buffer_factor).ceil() as u32;

    let unclamped = raw_pages
        .saturating_add(explicit_breaks)
        .saturating_add(avoid_break_buffer)
        .max(1);
    let total_pages = unclamped.min(geometry.max_pages.max(1));

    EstimateBreakdown {
        raw_pages,
        explicit_breaks,
        avoid_break_buffer,
        unclamped,
        total_pages,
    }
}

/// Estimated number of printed pages, in `1..=max_pages`
pub fn estimate_total_pages(metrics: &ContentMetrics, geometry: &PageGeometry) -> u32 {
    breakdown(metrics, geometry).total_pages
}

/// Result of running the estimator against a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateOutcome {
    /// Fresh estimate from current measurements
    Estimated(PaginationInfo),
    /// Measuring failed; carries the `{1, 1}` fallback
    Fallback(PaginationInfo),
    /// No container mounted; previous state stands
    Unmounted,
}

impl EstimateOutcome {
    /// Record to publish, if any
    pub fn info(&self) -> Option<PaginationInfo> {
        match self {
            EstimateOutcome::Estimated(info) | EstimateOutcome::Fallback(info) => Some(*info),
            EstimateOutcome::Unmounted => None,
        }
    }
}

/// Reads a container and turns its metrics into a page count
#[derive(Debug, Clone, Default)]
pub struct PageEstimator {
    geometry: PageGeometry,
}

impl PageEstimator {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Estimate from an already measured snapshot
    pub fn estimate_metrics(&self, metrics: &ContentMetrics) -> PaginationInfo {
        let terms = breakdown(metrics, &self.geometry);
        tracing::debug!(
            height = metrics.content_height,
            raw_pages = terms.raw_pages,
            explicit_breaks = terms.explicit_breaks,
            avoid_break_buffer = terms.avoid_break_buffer,
            total_pages = terms.total_pages,
            clamped = terms.clamped(),
            "estimated page count"
        );
        // Always back to the first page; see DESIGN.md open question.
        PaginationInfo::first_of(terms.total_pages)
    }

    /// Measure the container and estimate. Never fails.
    pub fn estimate<S: ContentSource + ?Sized>(&self, source: Option<&S>) -> EstimateOutcome {
        let Some(source) = source else {
            tracing::trace!("no content container mounted, skipping estimate");
            return EstimateOutcome::Unmounted;
        };

        match ContentMetrics::measure(source) {
            Ok(metrics) => EstimateOutcome::Estimated(self.estimate_metrics(&metrics)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to measure report content, falling back to one page");
                EstimateOutcome::Fallback(PaginationInfo::default())
            }
        }
    }
}
