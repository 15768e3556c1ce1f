//! Section composers: map each résumé section to block-renderer calls.
//!
//! Every composer follows the same visual contract: a section with no
//! entries is skipped entirely (no title, zero height), entry gaps go
//! between entries but never after the last one, and bullets share one
//! style across Experience, Projects and Certifications.

use crate::font::FontWeight;
use crate::layout::{LayoutEngine, TextMeasurer, TextOptions, TextStyle};
use crate::model::{ResumeDocument, SectionKind};

/// Gap between a wrapped role line and the right-aligned date column, mm.
const DATE_COLUMN_GAP: f64 = 4.0;

/// Draw the document header: name, contact line, divider rule.
pub fn compose_header<M: TextMeasurer>(engine: &mut LayoutEngine<M>, doc: &ResumeDocument) {
    let typography = *engine.typography();
    let spacing = *engine.spacing();
    let geo = *engine.geometry();

    engine.set_cursor_y(spacing.name_from_top);
    engine.draw_text(
        &doc.name.to_uppercase(),
        geo.margins.left,
        TextOptions::new(typography.name, geo.content_width()).centered(),
    );
    engine.advance(spacing.after_name);

    if !doc.contact.is_empty() {
        engine.draw_text(
            &doc.contact.display_line(),
            geo.margins.left,
            TextOptions::new(typography.contact, geo.content_width()).centered(),
        );
    }
    engine.advance(spacing.after_contact);

    engine.draw_rule(
        geo.margins.left,
        geo.page_width - geo.margins.right,
        engine.cursor_y(),
    );
}

/// Draw the optional summary paragraph, ahead of the ordered sections.
pub fn compose_summary<M: TextMeasurer>(engine: &mut LayoutEngine<M>, doc: &ResumeDocument) {
    let summary = match &doc.summary {
        Some(text) if !text.trim().is_empty() => text,
        _ => return,
    };
    let body = engine.typography().body;
    let geo = *engine.geometry();

    engine.draw_section_title("Summary");
    engine.draw_text(
        summary,
        geo.margins.left,
        TextOptions::new(body, geo.content_width()),
    );
}

/// Draw one section by kind. Sections with no entries are skipped.
pub fn compose_section<M: TextMeasurer>(
    engine: &mut LayoutEngine<M>,
    doc: &ResumeDocument,
    kind: SectionKind,
) {
    tracing::debug!(?kind, "composing section");
    match kind {
        SectionKind::Experience => compose_experience(engine, doc),
        SectionKind::Education => compose_education(engine, doc),
        SectionKind::Projects => compose_projects(engine, doc),
        SectionKind::Skills => compose_skills(engine, doc),
        SectionKind::Certifications => compose_certifications(engine, doc),
    }
}

fn compose_experience<M: TextMeasurer>(engine: &mut LayoutEngine<M>, doc: &ResumeDocument) {
    if doc.work_experience.is_empty() {
        return;
    }
    let typography = *engine.typography();
    let spacing = *engine.spacing();
    let geo = *engine.geometry();

    engine.draw_section_title("Experience");

    let last = doc.work_experience.len() - 1;
    for (i, entry) in doc.work_experience.iter().enumerate() {
        reserve_entry_header(engine, &entry.role, Some(&entry.company), !entry.bullets.is_empty());

        draw_dated_row(engine, &entry.role, &entry.date_range, typography.job_title);
        engine.draw_text(
            &entry.company,
            geo.margins.left,
            TextOptions::new(typography.company, geo.content_width()),
        );
        draw_bullet_list(engine, entry.bullets.iter().map(String::as_str));

        if i < last {
            engine.advance(spacing.between_entries);
        }
    }
}

fn compose_education<M: TextMeasurer>(engine: &mut LayoutEngine<M>, doc: &ResumeDocument) {
    if doc.education.is_empty() {
        return;
    }
    let typography = *engine.typography();
    let spacing = *engine.spacing();
    let geo = *engine.geometry();

    // Education sits visually further from the preceding section
    engine.advance(spacing.extra_before_education);
    engine.draw_section_title("Education");

    let last = doc.education.len() - 1;
    for (i, entry) in doc.education.iter().enumerate() {
        reserve_entry_header(engine, &entry.degree, Some(&entry.school), false);

        draw_dated_row(engine, &entry.degree, &entry.date_range, typography.job_title);
        engine.draw_text(
            &entry.school,
            geo.margins.left,
            TextOptions::new(typography.company, geo.content_width()),
        );

        if i < last {
            engine.advance(spacing.between_entries);
        }
    }
}

fn compose_projects<M: TextMeasurer>(engine: &mut LayoutEngine<M>, doc: &ResumeDocument) {
    if doc.projects.is_empty() {
        return;
    }
    let typography = *engine.typography();
    let spacing = *engine.spacing();
    let geo = *engine.geometry();

    engine.draw_section_title("Projects");

    let last = doc.projects.len() - 1;
    for (i, entry) in doc.projects.iter().enumerate() {
        reserve_entry_header(engine, &entry.title, None, !entry.bullets.is_empty());

        engine.draw_text(
            &entry.title,
            geo.margins.left,
            TextOptions::new(typography.job_title, geo.content_width()),
        );
        draw_bullet_list(engine, entry.bullets.iter().map(String::as_str));

        if i < last {
            engine.advance(spacing.between_entries);
        }
    }
}

fn compose_skills<M: TextMeasurer>(engine: &mut LayoutEngine<M>, doc: &ResumeDocument) {
    if doc.skills.is_empty() {
        return;
    }
    let typography = *engine.typography();
    let spacing = *engine.spacing();
    let geo = *engine.geometry();

    engine.draw_section_title("Skills");

    let label_style = TextStyle::new(typography.body.size_pt, FontWeight::Bold);
    let last = doc.skills.len() - 1;
    for (i, group) in doc.skills.iter().enumerate() {
        let label = format!("{}: ", group.category);
        let items = group.items.join(", ");
        let label_width = engine.text_width(&label, label_style);
        let items_width = (geo.content_width() - label_width).max(10.0);

        // The one place two differently-weighted runs share a visual line:
        // draw the bold label, rewind, draw the items offset by its width.
        let label_height = engine.line_height(label_style);
        let items_height = engine.measure_height(&items, typography.body, items_width);
        engine.ensure_space(label_height.max(items_height));

        let drawn = engine.draw_text(
            &label,
            geo.margins.left,
            TextOptions::new(label_style, geo.content_width()),
        );
        engine.rewind(drawn);
        let items_drawn = engine.draw_text(
            &items,
            geo.margins.left + label_width,
            TextOptions::new(typography.body, items_width),
        );
        if drawn > items_drawn {
            engine.advance(drawn - items_drawn);
        }

        if i < last {
            engine.advance(spacing.between_skill_rows);
        }
    }
}

fn compose_certifications<M: TextMeasurer>(engine: &mut LayoutEngine<M>, doc: &ResumeDocument) {
    if doc.certifications.is_empty() {
        return;
    }
    engine.draw_section_title("Certifications");

    let entries: Vec<String> = doc
        .certifications
        .iter()
        .map(|cert| cert.display_text())
        .collect();
    draw_bullet_list(engine, entries.iter().map(String::as_str));
}

/// Two-column row: `left_text` wrapped on the left, `date_range`
/// right-aligned at the vertical position of the first left line.
fn draw_dated_row<M: TextMeasurer>(
    engine: &mut LayoutEngine<M>,
    left_text: &str,
    date_range: &str,
    style: TextStyle,
) {
    let typography = *engine.typography();
    let geo = *engine.geometry();

    if date_range.is_empty() {
        engine.draw_text(
            left_text,
            geo.margins.left,
            TextOptions::new(style, geo.content_width()),
        );
        return;
    }

    let date_width = engine.text_width(date_range, typography.year);
    let left_max = (geo.content_width() - date_width - DATE_COLUMN_GAP).max(10.0);

    let left_height = engine.draw_text(
        left_text,
        geo.margins.left,
        TextOptions::new(style, left_max),
    );
    engine.rewind(left_height);
    let date_height = engine.draw_text(
        date_range,
        geo.margins.left,
        TextOptions::new(typography.year, geo.content_width()).right_aligned(),
    );
    if left_height > date_height {
        engine.advance(left_height - date_height);
    }
}

/// Bulleted list with the fixed indent and the gaps that separate it from
/// surrounding text. Draws nothing for an empty list.
fn draw_bullet_list<'a, M: TextMeasurer>(
    engine: &mut LayoutEngine<M>,
    bullets: impl Iterator<Item = &'a str>,
) {
    let body = engine.typography().body;
    let spacing = *engine.spacing();
    let geo = *engine.geometry();

    let mut any = false;
    for (i, bullet) in bullets.enumerate() {
        if i == 0 {
            engine.advance(spacing.around_bullet_list);
            any = true;
        }
        engine.draw_text(
            &format!("• {bullet}"),
            geo.margins.left + spacing.bullet_indent,
            TextOptions::new(body, geo.content_width() - spacing.bullet_indent),
        );
    }
    if any {
        engine.advance(spacing.around_bullet_list);
    }
}

/// Keep an entry header together with its first bullet: if the header plus
/// one bullet line cannot fit below the cursor, break now rather than
/// stranding the header at the bottom of the page.
fn reserve_entry_header<M: TextMeasurer>(
    engine: &mut LayoutEngine<M>,
    title: &str,
    subtitle: Option<&str>,
    has_bullets: bool,
) {
    let typography = *engine.typography();
    let spacing = *engine.spacing();
    let geo = *engine.geometry();

    let mut required = engine.measure_height(title, typography.job_title, geo.content_width());
    if let Some(subtitle) = subtitle {
        required += engine.measure_height(subtitle, typography.company, geo.content_width());
    }
    if has_bullets {
        // One line of the first bullet must land under the header
        required += spacing.around_bullet_list + engine.line_height(typography.body);
    }
    engine.ensure_space(required);
}
