use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// 1px line segment payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color,
}

impl DrawList {
    #[inline]
    pub fn push_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.push(DrawCmd::Line(LineCmd { from, to, color }));
    }
}
