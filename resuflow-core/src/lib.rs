//! # resuflow
//!
//! A pure Rust résumé-to-PDF renderer with a deterministic flow-layout
//! engine and zero external PDF dependencies.
//!
//! ## Features
//!
//! - **Flow layout**: top-down cursor layout in millimetres with automatic
//!   pagination and keep-together entry headers
//! - **Deterministic wrapping**: greedy word wrap over the built-in AFM
//!   metrics for the standard Helvetica family
//! - **Section composition**: experience, education, projects, skills and
//!   certifications, each skipped entirely when empty
//! - **Two-pass page numbers**: "Page i of n" footers stamped after layout,
//!   only on multi-page documents
//! - **Pure Rust PDF writer**: PDF 1.7 output with optional Flate
//!   compression, no C dependencies
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resuflow::{export_pdf, RenderOptions, ResumeDocument};
//!
//! # fn main() -> resuflow::Result<()> {
//! let json = std::fs::read_to_string("resume.json")?;
//! let doc: ResumeDocument = serde_json::from_str(&json)
//!     .map_err(|e| resuflow::ExportError::InvalidDocument(e.to_string()))?;
//!
//! export_pdf(&doc, &RenderOptions::default(), doc.pdf_file_name())?;
//! # Ok(())
//! # }
//! ```
//!
//! Layout inspection without touching the PDF backend:
//!
//! ```rust
//! use resuflow::{render_pages, RenderOptions, ResumeDocument};
//!
//! let doc = ResumeDocument {
//!     name: "Jane Doe".to_string(),
//!     ..Default::default()
//! };
//! let pages = render_pages(&doc, &RenderOptions::default());
//! assert_eq!(pages.len(), 1);
//! ```

pub mod compose;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod render;

pub use error::{ExportError, Result};
pub use font::{Font, FontWeight};
pub use layout::{
    FontMetricsMeasurer, LayoutEngine, PageContent, PageGeometry, Spacing, TextMeasurer, TextRun,
    TextStyle, Typography,
};
pub use model::{
    Certification, Contact, EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument,
    SectionKind, SkillGroup,
};
pub use render::{export_pdf, export_pdf_bytes, render_pages, RenderOptions};
