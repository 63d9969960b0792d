pub(crate) mod circle;
pub(crate) mod line;
pub(crate) mod rect;
pub(crate) mod shape;
pub(crate) mod sprite;

pub use circle::CircleCmd;
pub use line::LineCmd;
pub use rect::RectCmd;
pub use shape::ShapeCmd;
pub use sprite::SpriteCmd;
