use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::shape::ShapeCmd;
use crate::scene::shapes::sprite::SpriteCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
/// - teach `render::tessellate` (or a dedicated renderer) to draw it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Circle(CircleCmd),
    Line(LineCmd),
    Shape(ShapeCmd),
    Sprite(SpriteCmd),
}
