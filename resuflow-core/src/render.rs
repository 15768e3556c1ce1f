//! Document assembly: header, summary, ordered sections, page-number
//! stamping, PDF export.
//!
//! Rendering is two-pass. The layout pass flows every section through the
//! cursor engine and yields positioned pages; the stamp pass then writes
//! "Page i of n" footers, since the total is unknown until layout ends.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::compose;
use crate::error::Result;
use crate::layout::{
    FontMetricsMeasurer, LayoutEngine, PageContent, PageGeometry, Spacing, TextMeasurer, TextRun,
    Typography,
};
use crate::model::{ResumeDocument, SectionKind};
use crate::pdf::PdfWriter;

/// Knobs the caller may turn; everything else about the layout is fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Order in which the entry sections are rendered. The summary, when
    /// present, always precedes them.
    pub section_order: Vec<SectionKind>,
    /// Check page space per wrapped line instead of per block, letting a
    /// paragraph split across a page boundary.
    pub strict_per_line_break: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            section_order: SectionKind::default_order(),
            strict_per_line_break: false,
        }
    }
}

/// Lay out the full résumé and return the positioned pages, footers
/// stamped. The same document and options always produce the same pages.
pub fn render_pages(doc: &ResumeDocument, options: &RenderOptions) -> Vec<PageContent> {
    let geometry = PageGeometry::a4();
    let typography = Typography::default();
    let spacing = Spacing::default();
    let measurer = FontMetricsMeasurer;
    let footer_baseline = spacing.footer_baseline;
    let footer_style = typography.contact;

    let mut engine = LayoutEngine::new(
        geometry,
        typography,
        spacing,
        measurer,
        options.strict_per_line_break,
    );

    compose::compose_header(&mut engine, doc);
    compose::compose_summary(&mut engine, doc);
    for &kind in &options.section_order {
        compose::compose_section(&mut engine, doc, kind);
    }

    let mut pages = engine.finish();
    stamp_page_numbers(
        &mut pages,
        &geometry,
        footer_baseline,
        footer_style,
        &measurer,
    );
    tracing::info!(pages = pages.len(), "resume laid out");
    pages
}

/// Render the résumé and write it as a PDF to `path`.
pub fn export_pdf<P: AsRef<Path>>(
    doc: &ResumeDocument,
    options: &RenderOptions,
    path: P,
) -> Result<()> {
    let buffer = export_pdf_bytes(doc, options)?;
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&buffer)?;
    writer.flush()?;
    tracing::info!(path = %path.as_ref().display(), bytes = buffer.len(), "resume exported");
    Ok(())
}

/// Render the résumé and return the PDF file as bytes.
pub fn export_pdf_bytes(doc: &ResumeDocument, options: &RenderOptions) -> Result<Vec<u8>> {
    let pages = render_pages(doc, options);
    let mut writer = PdfWriter::new(PageGeometry::a4());
    writer.write_document(&pages)
}

/// Stamp "Page i of n" centered on every page. Single-page documents are
/// left unstamped.
fn stamp_page_numbers(
    pages: &mut [PageContent],
    geometry: &PageGeometry,
    baseline: f64,
    style: crate::layout::TextStyle,
    measurer: &impl TextMeasurer,
) {
    let total = pages.len();
    if total <= 1 {
        return;
    }
    for (i, page) in pages.iter_mut().enumerate() {
        let text = format!("Page {} of {}", i + 1, total);
        let width = measurer.line_width(&text, style);
        let x = geometry.margins.left + (geometry.content_width() - width) / 2.0;
        page.footer = Some(TextRun {
            text,
            x,
            y: baseline,
            style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contact, ExperienceEntry};
    use pretty_assertions::assert_eq;

    fn small_doc() -> ResumeDocument {
        ResumeDocument {
            name: "Jane Doe".to_string(),
            contact: Contact {
                email: Some("jane@example.com".to_string()),
                ..Default::default()
            },
            summary: Some("Engineer with a decade of systems work.".to_string()),
            ..Default::default()
        }
    }

    fn multi_page_doc() -> ResumeDocument {
        let mut doc = small_doc();
        doc.work_experience = (0..12)
            .map(|i| ExperienceEntry {
                role: format!("Role {i}"),
                company: format!("Company {i}"),
                date_range: "2020 - 2024".to_string(),
                bullets: vec![
                    "owned delivery of a large cross-team initiative end to end".to_string();
                    6
                ],
            })
            .collect();
        doc
    }

    #[test]
    fn test_single_page_has_no_footer() {
        let pages = render_pages(&small_doc(), &RenderOptions::default());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].footer.is_none());
    }

    #[test]
    fn test_multi_page_footers_numbered() {
        let pages = render_pages(&multi_page_doc(), &RenderOptions::default());
        assert!(pages.len() > 1);
        let total = pages.len();
        for (i, page) in pages.iter().enumerate() {
            let footer = page.footer.as_ref().expect("footer");
            assert_eq!(footer.text, format!("Page {} of {}", i + 1, total));
            assert_eq!(footer.y, Spacing::default().footer_baseline);
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let doc = multi_page_doc();
        let options = RenderOptions::default();
        let first = render_pages(&doc, &options);
        let second = render_pages(&doc, &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_section_order_is_honored() {
        let mut doc = small_doc();
        doc.work_experience = vec![ExperienceEntry {
            role: "Engineer".to_string(),
            company: "Acme".to_string(),
            date_range: String::new(),
            bullets: vec![],
        }];
        doc.skills = vec![crate::model::SkillGroup {
            category: "Languages".to_string(),
            items: vec!["Rust".to_string()],
        }];

        let reversed = RenderOptions {
            section_order: vec![SectionKind::Skills, SectionKind::Experience],
            ..Default::default()
        };
        let pages = render_pages(&doc, &reversed);
        let y_of = |needle: &str| {
            pages[0]
                .runs
                .iter()
                .find(|r| r.text == needle)
                .map(|r| r.y)
                .expect("run")
        };
        assert!(y_of("SKILLS") < y_of("EXPERIENCE"));
    }

    #[test]
    fn test_summary_precedes_ordered_sections() {
        let mut doc = small_doc();
        doc.skills = vec![crate::model::SkillGroup {
            category: "Languages".to_string(),
            items: vec!["Rust".to_string()],
        }];
        let pages = render_pages(&doc, &RenderOptions::default());
        let y_of = |needle: &str| {
            pages[0]
                .runs
                .iter()
                .find(|r| r.text == needle)
                .map(|r| r.y)
                .expect("run")
        };
        assert!(y_of("SUMMARY") < y_of("SKILLS"));
    }

    #[test]
    fn test_export_pdf_bytes_well_formed() {
        let bytes = export_pdf_bytes(&small_doc(), &RenderOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]);
        assert!(tail.contains("%%EOF"));
    }
}
