use serde::{Deserialize, Serialize};

/// Measured extent of a single-line text run, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

impl TextSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Axis-aligned bounding box of the text rotated by `degrees`.
    #[must_use]
    pub fn rotated(self, degrees: f64) -> Self {
        if degrees == 0.0 || !degrees.is_finite() {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        Self::new(
            self.width * cos + self.height * sin,
            self.width * sin + self.height * cos,
        )
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Text measurement capability consumed by the layout pass.
///
/// Drawing backends provide real metrics; headless callers can use
/// [`HeuristicTextMeasurer`].
pub trait TextMeasurer {
    fn measure_text(&self, text: &str, font_size_px: f64) -> TextSize;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure_text(&self, text: &str, font_size_px: f64) -> TextSize {
        (**self).measure_text(text, font_size_px)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Box<T> {
    fn measure_text(&self, text: &str, font_size_px: f64) -> TextSize {
        (**self).measure_text(text, font_size_px)
    }
}

/// Estimates metrics from glyph count: ~0.6em per glyph, 1.2em line height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicTextMeasurer {
    pub glyph_width_em: f64,
    pub line_height_em: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            glyph_width_em: 0.6,
            line_height_em: 1.2,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_text(&self, text: &str, font_size_px: f64) -> TextSize {
        if text.is_empty() || !font_size_px.is_finite() || font_size_px <= 0.0 {
            return TextSize::default();
        }
        let glyphs = text.chars().count() as f64;
        TextSize::new(
            glyphs * font_size_px * self.glyph_width_em,
            font_size_px * self.line_height_em,
        )
    }
}
