//! Coordinate and geometry types shared by the renderer and draw calls.
//!
//! Canonical CPU space:
//! - Window pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Renderers convert to NDC in shaders using a viewport uniform.

mod geometry;
mod rect;
mod transform;
mod vec2;
mod viewport;

pub use geometry::Geometry;
pub use rect::Rect;
pub use transform::Transform;
pub use vec2::Vec2;
pub use viewport::Viewport;
