//! Text measurement.
//!
//! Shaping and font metrics belong to the host; the view tree only asks for the extent of a
//! single line of text.

use cgmath::Vector2;
use core::fmt;
use unicode_width::UnicodeWidthStr;

/// Font description passed to the canvas and to text measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Font size in pixels.
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    pub fn new(size: f64) -> Font {
        Font {
            size,
            bold: false,
            italic: false,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new(14.)
    }
}

/// Measures text extents.
pub trait TextMeasure: fmt::Debug {
    /// Returns the width and height of `text` set in `font`.
    fn measure(&self, text: &str, font: &Font) -> Vector2<f64>;
}

/// Metrics that approximate a proportional font from column widths.
///
/// Used when the host does not provide real metrics. A column is 0.6 em wide (wide glyphs take two
/// columns), bold text is 5% wider, and a line is 1.2 em tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMetrics;

impl TextMeasure for ApproximateMetrics {
    fn measure(&self, text: &str, font: &Font) -> Vector2<f64> {
        if text.is_empty() {
            return Vector2::new(0., 0.);
        }
        let columns = text.width() as f64;
        let weight = if font.bold { 1.05 } else { 1. };
        Vector2::new(columns * font.size * 0.6 * weight, font.size * 1.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_glyphs_take_two_columns() {
        let font = Font::new(10.);
        let narrow = ApproximateMetrics.measure("ab", &font);
        let wide = ApproximateMetrics.measure("你好", &font);
        assert!((narrow.x - 12.).abs() < 1e-9);
        assert!((narrow.y - 12.).abs() < 1e-9);
        assert!((wide.x - 2. * narrow.x).abs() < 1e-9);
    }

    #[test]
    fn empty_text_has_no_extent() {
        assert_eq!(
            ApproximateMetrics.measure("", &Font::default()),
            Vector2::new(0., 0.)
        );
    }
}
