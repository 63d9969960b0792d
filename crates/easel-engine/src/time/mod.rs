//! Time subsystem.
//!
//! Provides testable frame timing without coupling to a backend.
//! Intended usage:
//! - one `FrameClock` per window
//! - call `tick()` at the start of each poll

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
