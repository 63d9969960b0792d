use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::coords::{Geometry, Rect, Transform, Vec2};
use crate::device::GpuInit;
use crate::input::{ButtonModel, InputSnapshot, Key, MouseButton};
use crate::paint::Color;
use crate::platform::{Backend, HeadlessBackend, HeadlessConfig, HeadlessHandle, NativeBackend};
use crate::scene::{DrawError, Frame, Shape};
use crate::texture::{ImageData, Texture};
use crate::time::FrameClock;

use super::WindowConfig;

/// Where a renderer is in its life.
///
/// `Closed` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleState {
    /// Constructed, never polled.
    Created,
    /// Polled at least once and not closed.
    Running,
    Closed,
}

/// One window, polled by its owner.
///
/// Usage per frame:
///
/// ```no_run
/// # use easel_engine::{coords::Vec2, paint::Color, window::Renderer};
/// # fn main() -> anyhow::Result<()> {
/// let mut renderer = Renderer::new(800, 600)?;
/// while renderer.is_running() {
///     renderer.begin_frame();
///     renderer.clear(Color::BLACK);
///     renderer.draw_line(Vec2::zero(), Vec2::new(800.0, 600.0), Color::WHITE);
///     renderer.swap_buffers();
/// }
/// # Ok(())
/// # }
/// ```
///
/// A renderer is owned by one thread. Draw calls only record; nothing reaches
/// the window until [`Renderer::swap_buffers`].
pub struct Renderer<B: Backend = NativeBackend> {
    backend: B,
    state: LifecycleState,
    title: String,
    geometry: Geometry,
    button_model: ButtonModel,
    input: InputSnapshot,
    clock: FrameClock,
    frame: Frame,
}

impl Renderer<NativeBackend> {
    /// Opens a native window titled "easel".
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::from_config(WindowConfig { width, height, ..WindowConfig::default() }, GpuInit::default())
    }

    pub fn with_title(width: u32, height: u32, title: impl Into<String>) -> Result<Self> {
        Self::from_config(WindowConfig::new(title, width, height), GpuInit::default())
    }

    /// Opens a native window with an explicit graphics configuration.
    ///
    /// Fails if the window or its graphics context cannot be created; nothing
    /// stays allocated in that case.
    pub fn from_config(config: WindowConfig, gpu_init: GpuInit) -> Result<Self> {
        let backend = NativeBackend::create(&config, gpu_init)?;
        Ok(Self::from_backend(backend, &config))
    }
}

impl Renderer<HeadlessBackend> {
    /// Creates a renderer without a display, scripted through the returned handle.
    pub fn headless(config: WindowConfig, headless: HeadlessConfig) -> Result<(Self, HeadlessHandle)> {
        let (backend, handle) = HeadlessBackend::create(&config, headless)?;
        Ok((Self::from_backend(backend, &config), handle))
    }
}

impl<B: Backend> Renderer<B> {
    /// Wraps an already created backend.
    pub fn from_backend(backend: B, config: &WindowConfig) -> Self {
        let button_model = config.button_model.unwrap_or_else(|| backend.button_model());
        Self {
            backend,
            state: LifecycleState::Created,
            title: config.title.clone(),
            geometry: config.geometry(),
            button_model,
            input: InputSnapshot::default(),
            clock: FrameClock::new(),
            frame: Frame::new(),
        }
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Advances one tick: stamps the frame clock, then drains pending window
    /// events without blocking.
    ///
    /// Returns `false` once a close was requested or [`Renderer::close`] was
    /// called, and keeps returning `false` afterwards.
    pub fn is_running(&mut self) -> bool {
        self.clock.tick();

        if self.state == LifecycleState::Closed {
            return false;
        }

        self.input.begin_poll();
        let input = &mut self.input;
        self.backend.pump_events(&mut |event| input.apply_event(event));

        if self.input.close_requested() {
            log::debug!("window \"{}\" closed by request", self.title);
            self.state = LifecycleState::Closed;
            return false;
        }

        self.state = LifecycleState::Running;
        true
    }

    /// Marks the renderer closed. Idempotent.
    ///
    /// The window stays allocated until the renderer is dropped.
    pub fn close(&mut self) {
        if self.state != LifecycleState::Closed {
            log::debug!("window \"{}\" closed", self.title);
            self.state = LifecycleState::Closed;
        }
    }

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Frames per second measured from the start of the last tick until now.
    ///
    /// Reads taken later in a frame report lower rates. Zero when no time has
    /// elapsed.
    pub fn get_framerate(&self) -> f64 {
        self.clock.framerate()
    }

    /// Time between the last two ticks.
    pub fn frame_time(&self) -> Duration {
        self.clock.frame_time()
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    // ── window ────────────────────────────────────────────────────────────

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.backend.set_title(&self.title);
    }

    /// Framebuffer size fixed at construction.
    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Starts out `false` until the window system reports focus.
    pub fn is_focused(&self) -> bool {
        self.input.focused()
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // ── input ─────────────────────────────────────────────────────────────

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    /// Last pointer position in window pixels; the origin before any motion.
    pub fn pointer_position(&self) -> Vec2 {
        self.input.pointer_position()
    }

    /// Button pressed during the most recent poll, if any.
    pub fn last_button(&self) -> Option<MouseButton> {
        self.input.last_button()
    }

    /// Key pressed during the most recent poll, if any.
    pub fn last_key(&self) -> Option<Key> {
        self.input.last_key()
    }

    pub fn button_model(&self) -> ButtonModel {
        self.button_model
    }

    /// Whether `button` counts as pressed under this renderer's
    /// [`ButtonModel`]. Scroll buttons are always one-shot.
    pub fn button_pressed(&self, button: MouseButton) -> bool {
        match self.button_model {
            ButtonModel::Live if !button.is_scroll() => self.backend.button_down(button),
            _ => self.input.last_button() == Some(button),
        }
    }

    /// Live held state of `key`.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.backend.key_down(key)
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Drops everything recorded so far and resets the transform.
    pub fn begin_frame(&mut self) {
        self.frame.begin();
    }

    /// Clears the frame to `color`. Draws recorded earlier in the frame are discarded.
    pub fn clear(&mut self, color: Color) {
        self.frame.clear(color);
    }

    /// Transform applied to subsequent draws.
    pub fn set_transform(&mut self, transform: Transform) {
        self.frame.list_mut().set_transform(transform);
    }

    pub fn reset_transform(&mut self) {
        self.frame.list_mut().set_transform(Transform::IDENTITY);
    }

    pub fn transform(&self) -> Transform {
        self.frame.list().transform()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Presents the recorded frame and starts recording the next one.
    ///
    /// Presenting is best-effort; a failed present is logged by the backend.
    pub fn swap_buffers(&mut self) {
        self.backend.present(&self.frame);
        self.frame.finish();
    }

    /// Colour at pixel (x, y) of the frame recorded so far.
    ///
    /// Call it before `swap_buffers`. A frame without `clear` reads as if it
    /// started transparent black. Coordinates outside the window fail with
    /// [`DrawError::FramebufferOutOfBounds`]; a lost graphics context is an
    /// environment error.
    pub fn read_pixel(&mut self, x: u32, y: u32) -> Result<Color> {
        let Geometry { width, height } = self.geometry;
        if !self.geometry.contains(x, y) {
            return Err(DrawError::FramebufferOutOfBounds { x, y, width, height }.into());
        }
        self.backend.read_pixel(&self.frame, x, y)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Axis-aligned rectangle with its top-left corner at `pos`.
    pub fn draw_rectangle(&mut self, pos: impl Into<Vec2>, size: impl Into<Vec2>, color: Color, filled: bool) {
        let rect = Rect::from_origin_size(pos.into(), size.into());
        self.frame.list_mut().push_rect(rect, color, filled);
    }

    pub fn draw_circle(&mut self, center: impl Into<Vec2>, radius: f32, color: Color, filled: bool) {
        self.frame.list_mut().push_circle(center.into(), radius, color, filled);
    }

    pub fn draw_line(&mut self, from: impl Into<Vec2>, to: impl Into<Vec2>, color: Color) {
        self.frame.list_mut().push_line(from.into(), to.into(), color);
    }

    /// Records the shape as it is now; later edits do not affect this frame.
    pub fn draw_shape(&mut self, shape: &Shape) {
        self.frame.list_mut().push_shape(shape);
    }

    /// Draws `texture` stretched over the rectangle at `pos` with `size`.
    pub fn draw_texture(&mut self, texture: &Texture, pos: impl Into<Vec2>, size: impl Into<Vec2>) {
        let rect = Rect::from_origin_size(pos.into(), size.into());
        self.frame.list_mut().push_sprite(texture.id(), rect);
    }

    // ── textures ──────────────────────────────────────────────────────────

    /// Decodes an image file and uploads it to this window.
    pub fn load_texture(&mut self, path: impl AsRef<Path>) -> Result<Texture> {
        let image = ImageData::open(path)?;
        self.create_texture(&image)
    }

    pub fn load_texture_from_memory(&mut self, bytes: &[u8]) -> Result<Texture> {
        let image = ImageData::from_memory(bytes)?;
        self.create_texture(&image)
    }

    /// Uploads decoded pixels. The texture belongs to this window only.
    pub fn create_texture(&mut self, image: &ImageData) -> Result<Texture> {
        let id = self.backend.upload_texture(image)?;
        Ok(Texture::new(id, image.size()))
    }

    /// Overwrites one texel of an uploaded texture.
    pub fn set_texture_pixel(
        &mut self,
        texture: &Texture,
        x: u32,
        y: u32,
        color: Color,
    ) -> std::result::Result<(), DrawError> {
        let size = texture.size();
        if !size.contains(x, y) {
            return Err(DrawError::PixelOutOfBounds { x, y, width: size.width, height: size.height });
        }
        self.backend.write_texture_pixel(texture.id(), x, y, color)
    }

    /// Frees the texture. Returns `false` if it was already released.
    pub fn release_texture(&mut self, texture: Texture) -> bool {
        self.backend.release_texture(texture.id())
    }
}

impl<B: Backend> Drop for Renderer<B> {
    fn drop(&mut self) {
        self.backend.destroy();
    }
}
