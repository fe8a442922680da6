//! Physical page descriptions

use super::{PageGeometry, DEFAULT_AVOID_BREAK_BUFFER_FACTOR, DEFAULT_MAX_PAGES};
use serde::{Deserialize, Serialize};

/// Common paper sizes, heights at 96 DPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    Letter,
    A4,
    Legal,
}

impl PaperSize {
    /// Page height in CSS pixels
    pub fn height(self) -> f64 {
        match self {
            PaperSize::Letter => 1056.0, // 11"
            PaperSize::A4 => 1122.52,    // 297mm
            PaperSize::Legal => 1344.0,  // 14"
        }
    }
}

/// Vertical layout of a printed page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageDimensions {
    pub page_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    /// Repeating report header
    pub header_height: f64,
    /// Repeating report footer
    pub footer_height: f64,
}

impl Default for PageDimensions {
    fn default() -> Self {
        Self::for_paper(PaperSize::Letter)
    }
}

impl PageDimensions {
    /// Paper with 1" margins and the report's header/footer chrome
    pub fn for_paper(paper: PaperSize) -> Self {
        Self {
            page_height: paper.height(),
            margin_top: 96.0,
            margin_bottom: 96.0,
            header_height: 114.0,
            footer_height: 114.0,
        }
    }

    /// Get usable content height per page
    pub fn content_height(&self) -> f64 {
        self.page_height
            - self.margin_top
            - self.margin_bottom
            - self.header_height
            - self.footer_height
    }

    /// Geometry with the default page ceiling and buffer factor
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            available_page_height: self.content_height(),
            max_pages: DEFAULT_MAX_PAGES,
            avoid_break_buffer_factor: DEFAULT_AVOID_BREAK_BUFFER_FACTOR,
        }
    }
}
