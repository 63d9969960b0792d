use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Axis-aligned rectangle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
    /// When false, only a 1px outline is drawn.
    pub filled: bool,
}

impl RectCmd {
    #[inline]
    pub fn new(rect: Rect, color: Color, filled: bool) -> Self {
        Self { rect, color, filled }
    }
}

impl DrawList {
    /// Records a rectangle draw command.
    #[inline]
    pub fn push_rect(&mut self, rect: Rect, color: Color, filled: bool) {
        self.push(DrawCmd::Rect(RectCmd::new(rect, color, filled)));
    }

    /// Records a solid rectangle.
    #[inline]
    pub fn push_solid_rect(&mut self, rect: Rect, color: Color) {
        self.push_rect(rect, color, true);
    }
}
