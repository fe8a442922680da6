//! Page geometry and pager configuration

mod paper;

pub use paper::{PageDimensions, PaperSize};

use crate::error::{PagerError, Result};
use serde::{Deserialize, Serialize};

/// Content height available on one printed page, in CSS pixels
pub const DEFAULT_AVAILABLE_PAGE_HEIGHT: f64 = 636.0;

/// Upper bound on any estimate
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Extra pages per avoid-break marker
pub const DEFAULT_AVOID_BREAK_BUFFER_FACTOR: f64 = 0.1;

/// Quiet period of the resize channel
pub const DEFAULT_RESIZE_QUIET_MS: u64 = 250;

/// Quiet period of the mutation channel
pub const DEFAULT_MUTATION_QUIET_MS: u64 = 150;

/// Geometry the estimator assumes for the print medium.
///
/// `available_page_height` is what remains of a physical page after
/// margins and repeating header/footer chrome. Use
/// [`PageDimensions::geometry`] to derive it from a paper description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageGeometry {
    pub available_page_height: f64,
    pub max_pages: u32,
    pub avoid_break_buffer_factor: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            available_page_height: DEFAULT_AVAILABLE_PAGE_HEIGHT,
            max_pages: DEFAULT_MAX_PAGES,
            avoid_break_buffer_factor: DEFAULT_AVOID_BREAK_BUFFER_FACTOR,
        }
    }
}

impl PageGeometry {
    pub fn new(available_page_height: f64, max_pages: u32, avoid_break_buffer_factor: f64) -> Self {
        Self {
            available_page_height,
            max_pages,
            avoid_break_buffer_factor,
        }
    }

    /// Reject geometry the estimator cannot divide by or clamp against
    pub fn validate(&self) -> Result<()> {
        if !self.available_page_height.is_finite() || self.available_page_height <= 0.0 {
            return Err(PagerError::InvalidGeometry(format!(
                "available page height must be positive, got {}",
                self.available_page_height
            )));
        }
        if self.max_pages == 0 {
            return Err(PagerError::InvalidGeometry(
                "max pages must be at least 1".to_string(),
            ));
        }
        if !self.avoid_break_buffer_factor.is_finite() || self.avoid_break_buffer_factor < 0.0 {
            return Err(PagerError::InvalidGeometry(format!(
                "avoid-break buffer factor must be non-negative, got {}",
                self.avoid_break_buffer_factor
            )));
        }
        Ok(())
    }
}

/// Quiet periods of the two debounce channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DebounceConfig {
    pub resize_quiet_ms: u64,
    pub mutation_quiet_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            resize_quiet_ms: DEFAULT_RESIZE_QUIET_MS,
            mutation_quiet_ms: DEFAULT_MUTATION_QUIET_MS,
        }
    }
}

impl DebounceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.resize_quiet_ms == 0 || self.mutation_quiet_ms == 0 {
            return Err(PagerError::InvalidDebounce(
                "quiet periods must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Full pager configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PagerConfig {
    pub geometry: PageGeometry,
    pub debounce: DebounceConfig,
}

impl PagerConfig {
    /// Parse a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PagerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        self.debounce.validate()
    }
}
