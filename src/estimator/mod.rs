//! Print page estimation from content measurements

mod engine;
mod source;

pub use engine::{
    breakdown, estimate_total_pages, EstimateBreakdown, EstimateOutcome, PageEstimator,
};
pub use source::{
    ContentMetrics, ContentSource, MarkerKind, AVOID_BREAK_CLASS, EXPLICIT_BREAK_CLASS,
};
