//! Easel engine crate.
//!
//! Polled native windows with immediate-mode 2D drawing. Each window is a
//! [`window::Renderer`]: the owner polls it with `is_running`, records draw
//! calls, and presents them with `swap_buffers`. Windows open through winit
//! and draw through wgpu; a headless backend stands in for both in tests.

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod platform;
pub mod render;
pub mod scene;
pub mod texture;
pub mod time;
pub mod window;

pub use crate::core::{App, AppControl, WindowSet};
pub use crate::window::{LifecycleState, Renderer, WindowConfig};
