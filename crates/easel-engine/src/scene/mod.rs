//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands recorded by immediate-mode calls
//! - keep deterministic paint order (recording order)
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`

mod cmd;
mod error;
mod frame;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use error::DrawError;
pub use frame::Frame;
pub use list::{DrawItem, DrawList};
pub use shapes::shape::{Shape, Vertex};
