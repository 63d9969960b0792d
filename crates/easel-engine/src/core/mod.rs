//! Application contracts and the per-window thread helper.
//!
//! An `App` holds the logic of one window; `WindowSet` gives every window a
//! thread of its own and joins them all at shutdown.

mod app;
mod construct;

pub use app::{run_app, App, AppControl};
pub use construct::WindowSet;
