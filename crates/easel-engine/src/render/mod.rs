//! GPU rendering subsystem.
//!
//! Renderers consume `scene` frames and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in window pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod common;
mod ctx;
mod mesh;
mod painter;
mod raster;
mod readback;
mod sprite;
pub(crate) mod tessellate;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::MeshRenderer;
pub use painter::FramePainter;
pub(crate) use painter::{Batch, FrameGeometry};
pub(crate) use raster::sample_pixel;
pub use sprite::SpriteRenderer;
