//! Backend-independent laid-out pages.
//!
//! The layout engine emits positioned runs in millimetres with a top-down Y
//! axis; a run's `y` is its baseline. Backends only translate coordinates
//! and never re-measure.

use crate::layout::geometry::TextStyle;

/// One positioned piece of text on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Left edge of the run, mm from the left page edge.
    pub x: f64,
    /// Baseline, mm from the top page edge.
    pub y: f64,
    pub style: TextStyle,
}

/// A horizontal rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleLine {
    pub x1: f64,
    pub x2: f64,
    /// Vertical position, mm from the top page edge.
    pub y: f64,
    /// Stroke width in mm.
    pub weight: f64,
}

/// Everything drawn on one finished page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    pub runs: Vec<TextRun>,
    pub rules: Vec<RuleLine>,
    /// Footer stamp, filled by the second pass when the document spans
    /// multiple pages.
    pub footer: Option<TextRun>,
}

impl PageContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() && self.rules.is_empty() && self.footer.is_none()
    }
}
