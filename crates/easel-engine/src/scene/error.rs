use std::fmt;

use crate::texture::TextureId;

/// Misuse of the drawing API.
///
/// These signal a contract violation in the caller's draw data, as opposed to
/// the environment failures reported through `anyhow::Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawError {
    /// A vertex index past the end of a shape's vertex list.
    VertexOutOfRange { index: usize, len: usize },
    /// A pixel coordinate outside a texture.
    PixelOutOfBounds { x: u32, y: u32, width: u32, height: u32 },
    /// A pixel coordinate outside the window's framebuffer.
    FramebufferOutOfBounds { x: u32, y: u32, width: u32, height: u32 },
    /// A texture handle that was released or belongs to another window.
    UnknownTexture(TextureId),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VertexOutOfRange { index, len } => {
                write!(f, "vertex index {index} is out of range for a shape with {len} vertices")
            }
            Self::PixelOutOfBounds { x, y, width, height } => {
                write!(f, "pixel ({x}, {y}) is outside a {width}x{height} texture")
            }
            Self::FramebufferOutOfBounds { x, y, width, height } => {
                write!(f, "pixel ({x}, {y}) is outside the {width}x{height} framebuffer")
            }
            Self::UnknownTexture(id) => write!(f, "unknown texture id {}", id.0),
        }
    }
}

impl std::error::Error for DrawError {}
