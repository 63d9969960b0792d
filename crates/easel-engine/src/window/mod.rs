//! Windows as seen by their owner: a polled `Renderer` per native window.
//!
//! Each renderer pumps its own events, records draw calls into a frame and
//! presents it on `swap_buffers`.

mod config;
mod renderer;

pub use config::WindowConfig;
pub use renderer::{LifecycleState, Renderer};
