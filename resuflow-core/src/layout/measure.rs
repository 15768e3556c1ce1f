//! Text measurement behind a trait, so the engine stays portable across
//! drawing backends. The bundled implementation wraps the AFM width tables
//! and is deterministic for identical inputs, which the purity guarantee of
//! the renderer depends on.

use crate::font::{measure_text, split_into_words, Font};
use crate::layout::geometry::{TextStyle, LINE_HEIGHT_MULTIPLIER, PT_TO_MM};

/// Word-wrapping text measurement.
///
/// Wrapping lives on the trait: the engine draws exactly the lines `wrap`
/// returns and derives every height from them, so a custom measurer can
/// never make pagination math and emitted runs disagree.
pub trait TextMeasurer {
    /// Wrap `text` into lines no wider than `max_width_mm` at the given
    /// style.
    fn wrap(&self, text: &str, style: TextStyle, max_width_mm: f64) -> Vec<String>;

    /// Width of `text` as a single unwrapped line, in mm.
    fn line_width(&self, text: &str, style: TextStyle) -> f64;

    /// Measured width of each wrapped line, in mm. The number of entries is
    /// the line count. Derived from `wrap`, keeping counts in agreement with
    /// what the engine draws.
    fn measure(&self, text: &str, style: TextStyle, max_width_mm: f64) -> Vec<f64> {
        self.wrap(text, style, max_width_mm)
            .iter()
            .map(|line| self.line_width(line, style))
            .collect()
    }

    /// Height of one line at the given style, in mm.
    fn line_height_mm(&self, style: TextStyle) -> f64 {
        style.size_pt * LINE_HEIGHT_MULTIPLIER * PT_TO_MM
    }
}

/// Measurer backed by the built-in Helvetica metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMetricsMeasurer;

impl TextMeasurer for FontMetricsMeasurer {
    fn wrap(&self, text: &str, style: TextStyle, max_width_mm: f64) -> Vec<String> {
        let font = Font::from(style.weight);
        let words = split_into_words(text);

        let mut lines: Vec<String> = Vec::new();
        let mut current_line = String::new();
        let mut current_width = 0.0;

        for word in words {
            let word_width = measure_text(word, font, style.size_pt) * PT_TO_MM;

            if !current_line.is_empty() && current_width + word_width > max_width_mm {
                lines.push(std::mem::take(&mut current_line));
                // A line never starts with the whitespace that broke it
                if word.trim().is_empty() {
                    current_width = 0.0;
                } else {
                    current_line = word.to_string();
                    current_width = word_width;
                }
            } else {
                current_line.push_str(word);
                current_width += word_width;
            }
        }

        if !current_line.is_empty() || lines.is_empty() {
            lines.push(current_line);
        }

        lines
    }

    fn line_width(&self, text: &str, style: TextStyle) -> f64 {
        measure_text(text, Font::from(style.weight), style.size_pt) * PT_TO_MM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontWeight;

    const BODY: TextStyle = TextStyle::new(10.0, FontWeight::Regular);

    #[test]
    fn test_short_text_is_one_line() {
        let measurer = FontMetricsMeasurer;
        let lines = measurer.measure("Hello", BODY, 100.0);
        assert_eq!(lines.len(), 1);
        assert!(lines[0] > 0.0);
        assert!(lines[0] <= 100.0);
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        let measurer = FontMetricsMeasurer;
        let lines = measurer.measure("", BODY, 100.0);
        assert_eq!(lines, vec![0.0]);
    }

    #[test]
    fn test_long_text_wraps() {
        let measurer = FontMetricsMeasurer;
        let text = "Designed and implemented a distributed ingestion pipeline \
                    processing forty million events per day with exactly once \
                    delivery semantics";
        let lines = measurer.measure(text, BODY, 60.0);
        assert!(lines.len() > 1);
        for width in &lines {
            assert!(*width <= 60.0, "line width {width} exceeds max");
        }
    }

    #[test]
    fn test_narrower_max_width_gives_more_lines() {
        let measurer = FontMetricsMeasurer;
        let text = "Led a team of six engineers across two product areas";
        let wide = measurer.measure(text, BODY, 150.0).len();
        let narrow = measurer.measure(text, BODY, 40.0).len();
        assert!(narrow > wide);
    }

    #[test]
    fn test_line_height_mm() {
        let measurer = FontMetricsMeasurer;
        let expected = 10.0 * 1.25 * PT_TO_MM;
        assert!((measurer.line_height_mm(BODY) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_agrees_with_measure() {
        let measurer = FontMetricsMeasurer;
        let text = "Shipped a greenfield billing service in Rust replacing a \
                    legacy PHP monolith over two quarters";
        for max_width in [40.0, 60.0, 90.0, 150.0] {
            let widths = measurer.measure(text, BODY, max_width);
            let lines = measurer.wrap(text, BODY, max_width);
            assert_eq!(widths.len(), lines.len(), "at max_width {max_width}");
            for (line, width) in lines.iter().zip(&widths) {
                let actual = measurer.line_width(line, BODY);
                assert!((actual - width).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_wrapped_lines_rejoin_to_original_words() {
        let text = "one two three four five six seven eight nine ten";
        let lines = FontMetricsMeasurer.wrap(text, BODY, 20.0);
        let rejoined = lines
            .iter()
            .map(|l| l.trim())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_determinism() {
        let measurer = FontMetricsMeasurer;
        let text = "Curated quarterly OKR reviews and postmortems";
        let a = measurer.measure(text, BODY, 55.0);
        let b = measurer.measure(text, BODY, 55.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_oversized_word_gets_own_line() {
        let measurer = FontMetricsMeasurer;
        let text = "a supercalifragilisticexpialidocious b";
        let lines = measurer.measure(text, BODY, 15.0);
        // The long word cannot fit but is not split within itself
        assert!(lines.len() >= 3);
        assert!(lines.iter().any(|w| *w > 15.0));
    }
}
