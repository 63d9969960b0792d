use super::Geometry;

/// Viewport size in window pixels.
///
/// Renderers treat this as the coordinate basis for converting pixel
/// positions to NDC in shaders.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

impl From<Geometry> for Viewport {
    #[inline]
    fn from(g: Geometry) -> Self {
        Viewport::new(g.width as f32, g.height as f32)
    }
}
