//! winit + wgpu backend.
//!
//! One platform thread owns the process's only winit event loop. Renderers
//! on other threads talk to it through commands and per-window channels.

mod backend;
mod event_loop;
mod translate;

pub use backend::NativeBackend;

pub(crate) use event_loop::platform;
