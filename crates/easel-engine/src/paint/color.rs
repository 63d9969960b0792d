/// Premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a` (premultiplied alpha).
///
/// Channels are written to a non-sRGB surface as-is, so a byte value of 128
/// ends up as 128 on screen.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Opaque color from 0–255 channels.
    ///
    /// Channels above 255 saturate to 255.
    #[inline]
    pub fn rgb(r: u32, g: u32, b: u32) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Color from straight-alpha 0–255 channels.
    ///
    /// Channels above 255 saturate to 255.
    #[inline]
    pub fn rgba(r: u32, g: u32, b: u32, a: u32) -> Self {
        let ch = |v: u32| v.min(255) as f32 / 255.0;
        Self::from_straight(ch(r), ch(g), ch(b), ch(a))
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Straight-alpha bytes, as stored in an RGBA8 texture.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let (r, g, b, a) = self.clamped().to_straight();
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(r), byte(g), byte(b), byte(a)]
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps all channels to [0, 1] and enforces premultiplication.
    #[inline]
    pub fn clamped(self) -> Self {
        let a = self.a.clamp(0.0, 1.0);

        // Clamp premultiplied rgb so it cannot exceed alpha.
        let r = self.r.clamp(0.0, a);
        let g = self.g.clamp(0.0, a);
        let b = self.b.clamp(0.0, a);

        Self { r, g, b, a }
    }

    /// Composites `self` over `dst` with premultiplied source-over blending.
    #[inline]
    pub fn over(self, dst: Color) -> Color {
        let k = 1.0 - self.a;
        Self {
            r: self.r + dst.r * k,
            g: self.g + dst.g * k,
            b: self.b + dst.b * k,
            a: self.a + dst.a * k,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        let c = Color::rgb(255, 0, 0);
        assert_eq!(c, Color::from_premul(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn channels_saturate_at_255() {
        assert_eq!(Color::rgba(300, 1000, 255, 999), Color::WHITE);
    }

    #[test]
    fn rgba_premultiplies() {
        let c = Color::rgba(255, 255, 255, 51);
        assert!((c.r - 0.2).abs() < 1e-6);
        assert!((c.a - 0.2).abs() < 1e-6);
    }

    #[test]
    fn rgba8_round_trips_straight_bytes() {
        assert_eq!(Color::rgba(10, 200, 30, 128).to_rgba8(), [10, 200, 30, 128]);
    }

    #[test]
    fn over_keeps_opaque_sources_and_mixes_translucent_ones() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(red.over(Color::WHITE), red);
        assert_eq!(Color::transparent().over(red), red);

        let half_blue = Color::from_premul(0.0, 0.0, 0.5, 0.5);
        assert_eq!(half_blue.over(red), Color::from_premul(0.5, 0.0, 0.5, 1.0));
    }

    #[test]
    fn transparent_has_zero_rgb_when_straightened() {
        assert_eq!(Color::transparent().to_straight(), (0.0, 0.0, 0.0, 0.0));
    }
}
