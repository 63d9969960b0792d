use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Circle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    /// When false, only a 1px ring is drawn.
    pub filled: bool,
}

impl CircleCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, color: Color, filled: bool) -> Self {
        Self { center, radius, color, filled }
    }
}

impl DrawList {
    /// Records a circle draw command.
    #[inline]
    pub fn push_circle(&mut self, center: Vec2, radius: f32, color: Color, filled: bool) {
        self.push(DrawCmd::Circle(CircleCmd::new(center, radius, color, filled)));
    }
}
