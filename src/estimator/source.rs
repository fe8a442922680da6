//! Content measurements the estimator reads

use crate::error::Result;

/// Class name of elements that force a page boundary
pub const EXPLICIT_BREAK_CLASS: &str = "explicit-break";

/// Class name of elements that must not be split across pages
pub const AVOID_BREAK_CLASS: &str = "avoid-break";

/// Structural markers counted in the content subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    ExplicitBreak,
    AvoidBreak,
}

impl MarkerKind {
    pub fn class_name(self) -> &'static str {
        match self {
            MarkerKind::ExplicitBreak => EXPLICIT_BREAK_CLASS,
            MarkerKind::AvoidBreak => AVOID_BREAK_CLASS,
        }
    }

    /// CSS selector matching the marker
    pub fn selector(self) -> String {
        format!(".{}", self.class_name())
    }
}

/// A mounted content container.
///
/// Any method may fail, e.g. when the host throws while measuring.
pub trait ContentSource {
    /// Full scrollable height of the content, in CSS pixels
    fn content_height(&self) -> Result<f64>;

    /// Number of elements in the subtree carrying the marker
    fn count_markers(&self, kind: MarkerKind) -> Result<usize>;
}

impl<S: ContentSource + ?Sized> ContentSource for &S {
    fn content_height(&self) -> Result<f64> {
        (**self).content_height()
    }

    fn count_markers(&self, kind: MarkerKind) -> Result<usize> {
        (**self).count_markers(kind)
    }
}

/// One snapshot of the container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentMetrics {
    pub content_height: f64,
    pub explicit_breaks: usize,
    pub avoid_breaks: usize,
}

impl ContentMetrics {
    pub fn new(content_height: f64, explicit_breaks: usize, avoid_breaks: usize) -> Self {
        Self {
            content_height,
            explicit_breaks,
            avoid_breaks,
        }
    }

    /// Read a fresh snapshot from a container
    pub fn measure<S: ContentSource + ?Sized>(source: &S) -> Result<Self> {
        Ok(Self {
            content_height: source.content_height()?,
            explicit_breaks: source.count_markers(MarkerKind::ExplicitBreak)?,
            avoid_breaks: source.count_markers(MarkerKind::AvoidBreak)?,
        })
    }

    /// Height with negative and NaN values treated as empty content
    pub fn normalized_height(&self) -> f64 {
        if self.content_height > 0.0 {
            self.content_height
        } else {
            0.0
        }
    }
}

/// A snapshot is itself a container that never fails
impl ContentSource for ContentMetrics {
    fn content_height(&self) -> Result<f64> {
        Ok(self.content_height)
    }

    fn count_markers(&self, kind: MarkerKind) -> Result<usize> {
        Ok(match kind {
            MarkerKind::ExplicitBreak => self.explicit_breaks,
            MarkerKind::AvoidBreak => self.avoid_breaks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors() {
        assert_eq!(MarkerKind::ExplicitBreak.selector(), ".explicit-break");
        assert_eq!(MarkerKind::AvoidBreak.selector(), ".avoid-break");
    }

    #[test]
    fn test_measure_snapshot() {
        let metrics = ContentMetrics::new(900.0, 2, 5);
        assert_eq!(ContentMetrics::measure(&metrics).unwrap(), metrics);
    }

    #[test]
    fn test_normalized_height() {
        assert_eq!(ContentMetrics::new(-10.0, 0, 0).normalized_height(), 0.0);
        assert_eq!(ContentMetrics::new(f64::NAN, 0, 0).normalized_height(), 0.0);
        assert_eq!(
            ContentMetrics::new(f64::INFINITY, 0, 0).normalized_height(),
            f64::INFINITY
        );
        assert_eq!(ContentMetrics::new(12.5, 0, 0).normalized_height(), 12.5);
    }
}
