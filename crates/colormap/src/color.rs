/// RGBA color in sRGB space with values in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Build from 8-bit sRGB channels
    #[inline]
    pub const fn from_srgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Quantize to 8-bit RGBA
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Quantize to 8-bit RGB, dropping alpha
    pub fn to_rgb8(self) -> [u8; 3] {
        let [r, g, b, _] = self.to_rgba8();
        [r, g, b]
    }
}

/// Linearly interpolate between two colors
pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    Color::new(
        from.r + (to.r - from.r) * t,
        from.g + (to.g - from.g) * t,
        from.b + (to.b - from.b) * t,
        from.a + (to.a - from.a) * t,
    )
}

/// Named colors used by the figure
pub mod css {
    use super::Color;

    pub const BLACK: Color = Color::from_srgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::from_srgba(255, 255, 255, 255);
    pub const GREEN: Color = Color::from_srgba(0, 128, 0, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_srgba() {
        assert_eq!(Color::from_srgba(8, 48, 107, 255).to_rgb8(), [8, 48, 107]);
        assert_eq!(Color::from_srgba(255, 255, 255, 255), Color::rgb(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_quantize_clamps() {
        let c = Color::new(1.5, -0.2, 0.5, 1.0);
        assert_eq!(c.to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_lerp_color() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let white = Color::rgb(1.0, 1.0, 1.0);
        let gray = lerp_color(black, white, 0.5);

        assert_eq!(gray.r, 0.5);
        assert_eq!(gray.g, 0.5);
        assert_eq!(gray.b, 0.5);
    }
}
