//! Content-stream generation: positioned runs and rules to PDF operators.

use std::fmt::Write;

use crate::font::Font;
use crate::layout::geometry::MM_TO_PT;
use crate::layout::{PageContent, PageGeometry, RuleLine, TextRun};

/// Serialize one laid-out page into a PDF content stream.
///
/// Layout coordinates are millimetres from the top-left corner; PDF wants
/// points from the bottom-left, so every y is flipped against the page
/// height on the way out.
pub fn build_content_stream(page: &PageContent, geometry: &PageGeometry) -> Vec<u8> {
    let mut ops = String::new();

    for run in &page.runs {
        write_text_run(&mut ops, run, geometry);
    }
    if let Some(footer) = &page.footer {
        write_text_run(&mut ops, footer, geometry);
    }
    for rule in &page.rules {
        write_rule(&mut ops, rule, geometry);
    }

    ops.into_bytes()
}

fn write_text_run(ops: &mut String, run: &TextRun, geometry: &PageGeometry) {
    let font = Font::from(run.style.weight);
    let x = run.x * MM_TO_PT;
    let y = (geometry.page_height - run.y) * MM_TO_PT;

    ops.push_str("BT\n");
    let _ = writeln!(ops, "/{} {} Tf", font.resource_name(), run.style.size_pt);
    let _ = writeln!(ops, "{x:.2} {y:.2} Td");
    ops.push('(');
    for byte in encode_win_ansi(&run.text) {
        match byte {
            b'(' => ops.push_str("\\("),
            b')' => ops.push_str("\\)"),
            b'\\' => ops.push_str("\\\\"),
            b'\n' => ops.push_str("\\n"),
            b'\r' => ops.push_str("\\r"),
            b'\t' => ops.push_str("\\t"),
            0x20..=0x7E => ops.push(byte as char),
            _ => {
                let _ = write!(ops, "\\{byte:03o}");
            }
        }
    }
    ops.push_str(") Tj\n");
    ops.push_str("ET\n");
}

fn write_rule(ops: &mut String, rule: &RuleLine, geometry: &PageGeometry) {
    let y = (geometry.page_height - rule.y) * MM_TO_PT;
    let _ = writeln!(ops, "{:.2} w", rule.weight * MM_TO_PT);
    let _ = writeln!(ops, "{:.2} {y:.2} m", rule.x1 * MM_TO_PT);
    let _ = writeln!(ops, "{:.2} {y:.2} l", rule.x2 * MM_TO_PT);
    ops.push_str("S\n");
}

/// Encode text as WinAnsi bytes. ASCII passes through; the typographic
/// characters the layout emits map to their Windows-1252 slots; anything
/// unmappable degrades to '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2026}' => 0x85, // ellipsis
            c if (c as u32) <= 0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}
