//! Paint model shared between draw calls and renderers.
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
