//! Page geometry, typography and spacing constants.
//!
//! All layout arithmetic is in millimetres on a top-down Y axis (0 at the top
//! edge of the page); the PDF backend converts to bottom-up points at
//! serialization time.

use crate::font::FontWeight;

/// Points to millimetres (1 pt = 1/72 inch).
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// Millimetres to points.
pub const MM_TO_PT: f64 = 72.0 / 25.4;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_MULTIPLIER: f64 = 1.25;

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Immutable page geometry: A4 with fixed margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margins: Margins,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageGeometry {
    /// A4 portrait, 210 x 297 mm, margins 20/2/10/10 (top/bottom/left/right).
    pub fn a4() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margins: Margins {
                top: 20.0,
                bottom: 2.0,
                left: 10.0,
                right: 10.0,
            },
        }
    }

    pub fn content_width(&self) -> f64 {
        self.page_width - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f64 {
        self.page_height - self.margins.top - self.margins.bottom
    }

    /// Whether a block of `required_height` fits below `cursor_y` on the
    /// current page.
    pub fn has_space(&self, cursor_y: f64, required_height: f64) -> bool {
        cursor_y + required_height <= self.margins.top + self.content_height()
    }
}

/// Font size and weight for one semantic text role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_pt: f64,
    pub weight: FontWeight,
}

impl TextStyle {
    pub const fn new(size_pt: f64, weight: FontWeight) -> Self {
        Self { size_pt, weight }
    }
}

/// Typography table: one style per semantic role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub name: TextStyle,
    pub contact: TextStyle,
    pub section_title: TextStyle,
    pub job_title: TextStyle,
    pub company: TextStyle,
    pub year: TextStyle,
    pub body: TextStyle,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            name: TextStyle::new(22.0, FontWeight::Bold),
            contact: TextStyle::new(9.0, FontWeight::Regular),
            section_title: TextStyle::new(12.0, FontWeight::Bold),
            job_title: TextStyle::new(10.5, FontWeight::Bold),
            company: TextStyle::new(10.0, FontWeight::Regular),
            year: TextStyle::new(10.0, FontWeight::Regular),
            body: TextStyle::new(10.0, FontWeight::Regular),
        }
    }
}

/// Vertical spacing table, all values in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Initial cursor position for the name block.
    pub name_from_top: f64,
    pub after_name: f64,
    pub after_contact: f64,
    pub before_section_title: f64,
    /// Extra pre-title gap used by the Education section.
    pub extra_before_education: f64,
    /// Gap between the title baseline and its underline rule.
    pub title_rule_offset: f64,
    pub after_section_title: f64,
    pub bullet_indent: f64,
    /// Gap between a bullet list and the surrounding text.
    pub around_bullet_list: f64,
    pub between_entries: f64,
    pub between_skill_rows: f64,
    /// Footer baseline, measured from the top of the page.
    pub footer_baseline: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            name_from_top: 20.0,
            after_name: 7.0,
            after_contact: 3.0,
            before_section_title: 4.0,
            extra_before_education: 2.0,
            title_rule_offset: 1.2,
            after_section_title: 3.0,
            bullet_indent: 4.0,
            around_bullet_list: 1.5,
            between_entries: 3.0,
            between_skill_rows: 1.5,
            footer_baseline: 291.0,
        }
    }
}
