use super::Vec2;

/// Axis-aligned rectangle: `origin` is the top-left corner in window pixels.
///
/// `size` may be negative when built from user input; call
/// [`Rect::normalized`] before tessellating.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::from_origin_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// True when either side is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Same area with non-negative width and height.
    pub fn normalized(self) -> Self {
        let far = self.origin + self.size;
        let x = self.origin.x.min(far.x);
        let y = self.origin.y.min(far.y);
        Rect::new(x, y, self.size.x.abs(), self.size.y.abs())
    }

    /// Top-left, top-right, bottom-right, bottom-left.
    pub fn corners(self) -> [Vec2; 4] {
        let Vec2 { x: x0, y: y0 } = self.origin;
        let Vec2 { x: x1, y: y1 } = self.origin + self.size;
        [Vec2::new(x0, y0), Vec2::new(x1, y0), Vec2::new(x1, y1), Vec2::new(x0, y1)]
    }
}
