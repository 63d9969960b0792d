//! Input subsystem.
//!
//! Public API is backend-agnostic and does not expose winit types.
//! Backends translate platform events into `InputEvent`s; the renderer folds
//! them into an `InputSnapshot` once per poll.

mod live;
mod state;
mod types;

pub use live::{key_pressed, HeldKey, HeldSet, KeyTable};
pub(crate) use live::GLOBAL_KEYS;
pub use state::InputSnapshot;
pub use types::{ButtonModel, InputEvent, Key, MouseButton};
