use crate::coords::Rect;
use crate::scene::{DrawCmd, DrawList};
use crate::texture::TextureId;

/// Textured quad payload.
///
/// The whole texture is stretched over `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    pub texture: TextureId,
    pub rect: Rect,
}

impl DrawList {
    #[inline]
    pub fn push_sprite(&mut self, texture: TextureId, rect: Rect) {
        self.push(DrawCmd::Sprite(SpriteCmd { texture, rect }));
    }
}
