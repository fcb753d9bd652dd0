//! Measurer backed by a real font file, via `fontdue`.
//!
//! Used when the operator points `FONT_PATH` at the exact face the display
//! renders with. The face carries its own weight, so `StyleParams::weight` is
//! not applied as a width factor here; line height still comes from the style.

use std::path::Path;

use fontdue::{Font, FontSettings};

use crate::layout::measure::{
    check_font_size, wrap_words, MeasureError, MeasureRequest, TextExtent, TextMeasurer,
};
use crate::layout::probe::ProbeLedger;

pub struct FontFileMeasurer {
    font: Font,
    space_em: f32,
    ledger: ProbeLedger,
}

impl FontFileMeasurer {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MeasureError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| MeasureError::FontLoad(e.to_string()))?;
        let space_em = font.metrics(' ', 1.0).advance_width;
        Ok(Self {
            font,
            space_em,
            ledger: ProbeLedger::new(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, MeasureError> {
        let bytes = std::fs::read(path)
            .map_err(|e| MeasureError::FontLoad(format!("{}: {e}", path.display())))?;
        Self::from_bytes(&bytes)
    }

    /// Advance width of a word in em, kerning pairs included.
    ///
    /// fontdue scales linearly with px, so metrics taken at 1px are em units.
    fn word_em(&self, word: &str) -> f32 {
        let mut total = 0.0_f32;
        let mut previous: Option<char> = None;
        for c in word.chars() {
            if let Some(left) = previous {
                total += self.font.horizontal_kern(left, c, 1.0).unwrap_or(0.0);
            }
            total += self.font.metrics(c, 1.0).advance_width;
            previous = Some(c);
        }
        total
    }
}

impl TextMeasurer for FontFileMeasurer {
    fn measure(&self, request: &MeasureRequest<'_>) -> Result<TextExtent, MeasureError> {
        let _probe = self.ledger.acquire();
        check_font_size(request.font_size_px)?;

        let words: Vec<&str> = request.content.split_whitespace().collect();
        let scale = request.font_size_px;
        let outcome = wrap_words(
            &words,
            self.space_em,
            |word| self.word_em(word),
            scale,
            request.constrained_width,
        );
        Ok(outcome.extent(scale, request.font_size_px, request.style.line_height))
    }

    fn backend(&self) -> &'static str {
        "font-file"
    }

    fn ledger(&self) -> &ProbeLedger {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::layout::font_metrics::{FontWeight, StyleParams};
    use crate::layout::solver::{solve, Container, FitOutcome, FitParams};

    const FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

    fn measurer() -> FontFileMeasurer {
        FontFileMeasurer::from_bytes(FONT).unwrap()
    }

    fn single_line(measurer: &FontFileMeasurer, text: &str, size: f32) -> TextExtent {
        let style = StyleParams::default();
        measurer
            .measure(&MeasureRequest::new(text, size, &style))
            .unwrap()
    }

    // ── measuring ───────────────────────────────────────────────────────────

    #[test]
    fn test_width_scales_linearly_with_size() {
        let measurer = measurer();
        let small = single_line(&measurer, "Wide Words", 20.0);
        let large = single_line(&measurer, "Wide Words", 60.0);
        assert!(small.width > 0.0);
        assert!((large.width - 3.0 * small.width).abs() < 1e-2, "{small:?} vs {large:?}");
        // Line box from the style: 1.1 × size.
        assert!((large.height - 66.0).abs() < 1e-3);
    }

    #[test]
    fn test_real_advances_differ_per_glyph() {
        let measurer = measurer();
        let narrow = single_line(&measurer, "iiii", 40.0);
        let wide = single_line(&measurer, "WWWW", 40.0);
        assert!(wide.width > 2.0 * narrow.width);
    }

    #[test]
    fn test_kerning_never_widens_av() {
        let measurer = measurer();
        let pair = measurer.word_em("AV");
        let apart = measurer.word_em("A") + measurer.word_em("V");
        assert!(pair <= apart + 1e-6);
    }

    #[test]
    fn test_weight_comes_from_the_face() {
        let measurer = measurer();
        let regular = StyleParams {
            weight: FontWeight::REGULAR,
            ..StyleParams::default()
        };
        let black = StyleParams::default();
        let a = measurer
            .measure(&MeasureRequest::new("Same", 30.0, &regular))
            .unwrap();
        let b = measurer
            .measure(&MeasureRequest::new("Same", 30.0, &black))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_constrained_wraps_only_at_whitespace() {
        let measurer = measurer();
        let style = StyleParams::default();
        let text = "alpha beta gamma delta";
        let size = 32.0;
        let limit = single_line(&measurer, "alpha beta", size).width + 0.5;

        let wrapped = measurer
            .measure(&MeasureRequest::new(text, size, &style).constrained(limit))
            .unwrap();
        assert!(wrapped.width <= limit);
        // "alpha beta" fills the first line; the rest needs at least one more.
        let line = style.line_height * size;
        assert!(wrapped.height >= 2.0 * line - 1e-3);
        for word in text.split_whitespace() {
            assert!(single_line(&measurer, word, size).width <= wrapped.width);
        }
    }

    #[test]
    fn test_oversized_word_overflows_instead_of_splitting() {
        let measurer = measurer();
        let style = StyleParams::default();
        let word = single_line(&measurer, "Supercalifragilistic", 48.0);
        let limit = word.width / 3.0;
        let request =
            MeasureRequest::new("a Supercalifragilistic b", 48.0, &style).constrained(limit);
        let wrapped = measurer.measure(&request).unwrap();
        assert!((wrapped.width - word.width).abs() < 1e-3);
        assert!((wrapped.height - 3.0 * style.line_height * 48.0).abs() < 1e-3);
    }

    #[test]
    fn test_solve_with_font_file_balances_probes() {
        let measurer = measurer();
        let style = StyleParams::default();
        let container = Container::new(800.0, 600.0).unwrap();
        let result = solve(
            "big words here",
            container,
            &style,
            &measurer,
            &FitParams::default(),
        );
        assert_eq!(result.outcome, FitOutcome::Fitted);
        for word in ["big", "words", "here"] {
            assert!(single_line(&measurer, word, result.font_size_px).width <= 720.0);
        }
        let stats = measurer.ledger().stats();
        assert_eq!(stats.outstanding, 0);
        assert!(stats.acquired > 0);
    }

    // ── loading ─────────────────────────────────────────────────────────────

    #[test]
    fn test_garbage_bytes_are_a_load_error() {
        let result = FontFileMeasurer::from_bytes(b"definitely not a font");
        assert!(matches!(result, Err(MeasureError::FontLoad(_))));
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FontFileMeasurer::from_path(&dir.path().join("missing.ttf"));
        match result {
            Err(MeasureError::FontLoad(msg)) => assert!(msg.contains("missing.ttf")),
            _ => panic!("expected FontLoad error for a missing file"),
        }
    }

    #[test]
    fn test_corrupt_file_is_a_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 64]).unwrap();
        let result = FontFileMeasurer::from_path(file.path());
        assert!(matches!(result, Err(MeasureError::FontLoad(_))));
    }
}
