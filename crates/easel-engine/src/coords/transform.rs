use super::Vec2;

/// 2D affine transform applied to draw calls.
///
/// Composition matches the fixed-function order translate → rotate → scale:
/// a point is scaled first, then rotated about the window origin, then
/// translated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub translate: Vec2,
    pub scale: Vec2,
    /// Clockwise on screen (+Y points down).
    pub rotation_degrees: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate: Vec2::zero(),
        scale: Vec2::new(1.0, 1.0),
        rotation_degrees: 0.0,
    };

    #[inline]
    pub fn translation(x: f32, y: f32) -> Self {
        Self { translate: Vec2::new(x, y), ..Self::IDENTITY }
    }

    #[inline]
    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate = Vec2::new(x, y);
        self
    }

    #[inline]
    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale = Vec2::new(x, y);
        self
    }

    #[inline]
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Maps a point through the transform.
    pub fn apply(&self, p: Vec2) -> Vec2 {
        if self.is_identity() {
            return p;
        }

        let s = p.scale(self.scale);
        let (sin, cos) = self.rotation_degrees.to_radians().sin_cos();
        let r = Vec2::new(s.x * cos - s.y * sin, s.x * sin + s.y * cos);
        r + self.translate
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
