//! Textures: decoded image data and the handles draw calls refer to.
//!
//! Decoding is delegated to the `image` crate; GPU storage belongs to the
//! backend that uploaded the texture.

mod decode;

pub use decode::ImageData;

use crate::coords::Geometry;

/// Backend-assigned texture identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TextureId(pub u32);

/// Handle to an uploaded texture.
///
/// Handles are plain values; releasing the texture through the renderer
/// invalidates every copy.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Texture {
    id: TextureId,
    size: Geometry,
}

impl Texture {
    #[inline]
    pub(crate) fn new(id: TextureId, size: Geometry) -> Self {
        Self { id, size }
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Size of the source image in pixels.
    #[inline]
    pub fn size(&self) -> Geometry {
        self.size
    }
}
