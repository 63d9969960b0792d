use std::fmt;

/// Width and height of a window or texture, in pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A window needs both sides to be non-zero.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[inline]
    pub const fn contains(self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Half-open bounds check for a sub-pixel position.
    #[inline]
    pub fn contains_point(self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_side_is_invalid() {
        assert!(!Geometry::new(0, 600).is_valid());
        assert!(!Geometry::new(800, 0).is_valid());
        assert!(Geometry::new(800, 600).is_valid());
    }

    #[test]
    fn contains_is_half_open() {
        let g = Geometry::new(4, 3);
        assert!(g.contains(0, 0));
        assert!(g.contains(3, 2));
        assert!(!g.contains(4, 0));
        assert!(!g.contains(0, 3));
    }

    #[test]
    fn contains_point_rejects_negative_and_far_edges() {
        let g = Geometry::new(800, 600);
        assert!(g.contains_point(0.0, 0.0));
        assert!(g.contains_point(799.5, 599.5));
        assert!(!g.contains_point(-30.0, 300.0));
        assert!(!g.contains_point(400.0, 900.0));
        assert!(!g.contains_point(800.0, 0.0));
        assert!(!g.contains_point(f64::NAN, 0.0));
    }

    #[test]
    fn displays_as_width_by_height() {
        assert_eq!(Geometry::new(800, 600).to_string(), "800x600");
    }
}
