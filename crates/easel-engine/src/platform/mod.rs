//! Platform backends: native windows, or a scriptable headless stand-in.

pub mod headless;
pub mod native;

use anyhow::Result;

use crate::input::{ButtonModel, InputEvent, Key, MouseButton};
use crate::paint::Color;
use crate::scene::{DrawError, Frame};
use crate::texture::{ImageData, TextureId};

pub use headless::{HeadlessBackend, HeadlessConfig, HeadlessHandle, HeadlessProbe, PresentedFrame};
pub use native::NativeBackend;

/// One window plus its graphics context, as seen by a `Renderer`.
///
/// Everything except construction is best-effort: failures are logged, not
/// returned, apart from texture calls whose errors describe caller mistakes.
pub trait Backend {
    /// Delivers every pending event to `sink` without blocking.
    fn pump_events(&mut self, sink: &mut dyn FnMut(InputEvent));

    fn set_title(&mut self, title: &str);

    /// Paints `frame` and presents it.
    fn present(&mut self, frame: &Frame);

    /// Button semantics this backend provides by default.
    fn button_model(&self) -> ButtonModel;

    /// Live held state of `button` in this window.
    fn button_down(&self, button: MouseButton) -> bool;

    /// Live held state of `key`.
    fn key_down(&self, key: Key) -> bool;

    fn upload_texture(&mut self, image: &ImageData) -> Result<TextureId>;

    fn write_texture_pixel(
        &mut self,
        id: TextureId,
        x: u32,
        y: u32,
        color: Color,
    ) -> std::result::Result<(), DrawError>;

    /// Returns `false` if `id` was not known.
    fn release_texture(&mut self, id: TextureId) -> bool;

    /// Colour pixel (x, y) would have once `frame` is painted. Blocks until
    /// the answer is known. Callers check the coordinates.
    fn read_pixel(&mut self, frame: &Frame, x: u32, y: u32) -> Result<Color>;

    /// Releases the graphics context, then the window. Idempotent.
    fn destroy(&mut self);
}

/// Starts the native platform thread ahead of time.
///
/// Optional: the first native `Renderer` starts it on demand. Calling this
/// from `main` surfaces platform start-up failures before any window exists.
pub fn init() -> Result<()> {
    native::platform().map(|_| ())
}
