//! RGBA color with the derivation helpers used by theme rules

/// Fixed factor applied by the automatic status-bar derivation.
pub const DARKEN_FACTOR: f32 = 0.85;

/// Perceived-darkness threshold: a color is "light" when its darkness
/// (`1.0 - luminance`) falls below this value.
pub const LIGHTNESS_THRESHOLD: f32 = 0.4;

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from a 0xRRGGBB hex value
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Create a color from a packed 0xAARRGGBB value
    pub fn from_argb(argb: u32) -> Self {
        let a = ((argb >> 24) & 0xFF) as f32 / 255.0;
        let r = ((argb >> 16) & 0xFF) as f32 / 255.0;
        let g = ((argb >> 8) & 0xFF) as f32 / 255.0;
        let b = (argb & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Pack into a 0xAARRGGBB value (the form persisted by the theme store)
    pub fn to_argb(self) -> u32 {
        let quant = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (quant(self.a) << 24) | (quant(self.r) << 16) | (quant(self.g) << 8) | quant(self.b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Linear interpolation between two colors
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }

    /// Perceived luminance (ITU-R BT.601 luma weights)
    pub fn luminance(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Whether the color reads as "light" for icon-contrast purposes
    pub fn is_light(self) -> bool {
        1.0 - self.luminance() < LIGHTNESS_THRESHOLD
    }

    /// Scale the RGB channels by `factor`, preserving alpha
    pub fn darken(self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
            a: self.a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_round_trip() {
        let packed = 0xFF3584E4;
        let color = Color::from_argb(packed);
        assert_eq!(color.to_argb(), packed);

        let translucent = 0x803584E4;
        assert_eq!(Color::from_argb(translucent).to_argb(), translucent);
    }

    #[test]
    fn test_from_hex_is_opaque() {
        let c = Color::from_hex(0x3584E4);
        assert_eq!(c.a, 1.0);
        assert_eq!(c.to_argb() >> 24, 0xFF);
    }

    #[test]
    fn test_luminance_extremes() {
        assert!(Color::WHITE.luminance() > 0.99);
        assert!(Color::BLACK.luminance() < 0.01);
    }

    #[test]
    fn test_is_light_threshold() {
        assert!(Color::WHITE.is_light());
        assert!(!Color::BLACK.is_light());
        // A mid-dark blue is not light
        assert!(!Color::from_hex(0x1A237E).is_light());
        // A pale yellow is light
        assert!(Color::from_hex(0xFFF9C4).is_light());
    }

    #[test]
    fn test_darken_scales_rgb_only() {
        let c = Color::rgba(0.8, 0.4, 0.2, 0.5).darken(0.5);
        assert_eq!(c.r, 0.4);
        assert_eq!(c.g, 0.2);
        assert_eq!(c.b, 0.1);
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn test_darken_factor_matches_packed_math() {
        let primary = Color::from_hex(0x3584E4);
        let darker = primary.darken(DARKEN_FACTOR);
        assert!(darker.luminance() < primary.luminance());
        assert_eq!(darker.a, 1.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::from_hex(0x000000);
        let b = Color::from_hex(0xFFFFFF);
        assert_eq!(Color::lerp(&a, &b, 0.0), a);
        assert_eq!(Color::lerp(&a, &b, 1.0), b);
        let mid = Color::lerp(&a, &b, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
    }
}
