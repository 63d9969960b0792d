use crate::platform::{Backend, NativeBackend};
use crate::window::Renderer;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    /// Close the window; the loop ends at the next poll.
    Exit,
}

/// Per-window application logic.
///
/// Closures `FnMut(&mut Renderer<B>) -> AppControl` implement this trait.
pub trait App<B: Backend = NativeBackend> {
    /// Called once per poll while the window is running.
    fn on_update(&mut self, renderer: &mut Renderer<B>) -> AppControl;
}

impl<B, F> App<B> for F
where
    B: Backend,
    F: FnMut(&mut Renderer<B>) -> AppControl,
{
    fn on_update(&mut self, renderer: &mut Renderer<B>) -> AppControl {
        self(renderer)
    }
}

/// Polls `renderer` until it closes, calling `app` once per poll.
pub fn run_app<B, A>(renderer: &mut Renderer<B>, app: &mut A)
where
    B: Backend,
    A: App<B> + ?Sized,
{
    while renderer.is_running() {
        if app.on_update(renderer) == AppControl::Exit {
            renderer.close();
        }
    }
}
