/// An RGBA color with components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0., 0., 0., 0.);
    pub const BLACK: Color = Color::rgb(0., 0., 0.);
    pub const WHITE: Color = Color::rgb(1., 1., 1.);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color::rgba(r, g, b, 1.)
    }

    /// Creates an opaque color from a `0xRRGGBB` value.
    pub fn from_hex(rgb: u32) -> Color {
        let channel = |shift: u32| f64::from((rgb >> shift) & 0xff) / 255.;
        Color::rgb(channel(16), channel(8), channel(0))
    }

    /// Returns this color with its alpha multiplied by `opacity`.
    pub fn with_opacity(self, opacity: f64) -> Color {
        Color {
            a: self.a * opacity.max(0.).min(1.),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex() {
        let c = Color::from_hex(0x3498db);
        assert!((c.r - 0x34 as f64 / 255.).abs() < 1e-9);
        assert!((c.g - 0x98 as f64 / 255.).abs() < 1e-9);
        assert!((c.b - 0xdb as f64 / 255.).abs() < 1e-9);
        assert_eq!(c.a, 1.);
    }
}
