//! Scriptable backend without a display or GPU.
//!
//! Tests drive a `HeadlessBackend` through its `HeadlessHandle`: queue input
//! events, hold buttons and keys, then inspect the title, presented frames and
//! texture contents. A `HeadlessProbe` counts live windows and contexts so
//! teardown can be checked for leaks.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{anyhow, Context, Result};

use crate::input::{ButtonModel, InputEvent, Key, MouseButton};
use crate::paint::Color;
use crate::platform::Backend;
use crate::render::{sample_pixel, FrameGeometry};
use crate::scene::{DrawError, DrawItem, Frame};
use crate::texture::{ImageData, TextureId};
use crate::window::WindowConfig;

// ── probe ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct ProbeCounters {
    windows: AtomicUsize,
    contexts: AtomicUsize,
}

/// Counts headless windows and contexts that are currently allocated.
#[derive(Debug, Clone, Default)]
pub struct HeadlessProbe {
    counters: Arc<ProbeCounters>,
}

impl HeadlessProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_windows(&self) -> usize {
        self.counters.windows.load(Ordering::SeqCst)
    }

    pub fn live_contexts(&self) -> usize {
        self.counters.contexts.load(Ordering::SeqCst)
    }

    fn acquire(&self, kind: Resource) -> ProbeSlot {
        kind.counter(&self.counters).fetch_add(1, Ordering::SeqCst);
        ProbeSlot { counters: Arc::clone(&self.counters), kind }
    }
}

#[derive(Debug, Copy, Clone)]
enum Resource {
    Window,
    Context,
}

impl Resource {
    fn counter(self, counters: &ProbeCounters) -> &AtomicUsize {
        match self {
            Resource::Window => &counters.windows,
            Resource::Context => &counters.contexts,
        }
    }
}

/// Decrements its counter when dropped.
#[derive(Debug)]
struct ProbeSlot {
    counters: Arc<ProbeCounters>,
    kind: Resource,
}

impl Drop for ProbeSlot {
    fn drop(&mut self) {
        self.kind.counter(&self.counters).fetch_sub(1, Ordering::SeqCst);
    }
}

// ── config ────────────────────────────────────────────────────────────────

/// Headless backend options.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub button_model: ButtonModel,
    /// Make graphics context creation fail (the window is created first).
    pub fail_context: bool,
    pub probe: Option<HeadlessProbe>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self { button_model: ButtonModel::OneShot, fail_context: false, probe: None }
    }
}

// ── shared state ──────────────────────────────────────────────────────────

/// What a headless `present` recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedFrame {
    pub clear: Option<Color>,
    pub items: Vec<DrawItem>,
}

#[derive(Debug, Default)]
struct HeadlessState {
    events: VecDeque<InputEvent>,
    buttons: HashSet<MouseButton>,
    keys: HashSet<Key>,
    title: String,
    presented: Vec<PresentedFrame>,
    textures: HashMap<TextureId, ImageData>,
    next_texture: u32,
    destroyed: bool,
}

/// Test-side handle onto a `HeadlessBackend`. Cloneable and `Send`.
#[derive(Debug, Clone)]
pub struct HeadlessHandle {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessHandle {
    fn lock(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues an event for the next poll.
    pub fn push_event(&self, event: InputEvent) {
        self.lock().events.push_back(event);
    }

    pub fn push_events(&self, events: impl IntoIterator<Item = InputEvent>) {
        self.lock().events.extend(events);
    }

    pub fn pending_events(&self) -> usize {
        self.lock().events.len()
    }

    /// Sets the live held state of a button.
    pub fn set_button(&self, button: MouseButton, down: bool) {
        let mut state = self.lock();
        if down {
            state.buttons.insert(button);
        } else {
            state.buttons.remove(&button);
        }
    }

    pub fn set_key(&self, key: Key, down: bool) {
        let mut state = self.lock();
        if down {
            state.keys.insert(key);
        } else {
            state.keys.remove(&key);
        }
    }

    pub fn title(&self) -> String {
        self.lock().title.clone()
    }

    pub fn presented_frames(&self) -> Vec<PresentedFrame> {
        self.lock().presented.clone()
    }

    pub fn present_count(&self) -> usize {
        self.lock().presented.len()
    }

    pub fn texture_count(&self) -> usize {
        self.lock().textures.len()
    }

    /// Straight-alpha RGBA bytes of one texel.
    pub fn texture_pixel(&self, id: TextureId, x: u32, y: u32) -> Option<[u8; 4]> {
        self.lock().textures.get(&id)?.pixel(x, y)
    }

    pub fn is_destroyed(&self) -> bool {
        self.lock().destroyed
    }
}

// ── backend ───────────────────────────────────────────────────────────────

/// Backend that renders nowhere and takes its input from a `HeadlessHandle`.
#[derive(Debug)]
pub struct HeadlessBackend {
    handle: HeadlessHandle,
    button_model: ButtonModel,
    window: Option<ProbeSlot>,
    context: Option<ProbeSlot>,
}

impl HeadlessBackend {
    /// Creates the backend and the handle that scripts it.
    pub fn create(config: &WindowConfig, headless: HeadlessConfig) -> Result<(Self, HeadlessHandle)> {
        let size = config.geometry();
        anyhow::ensure!(size.is_valid(), "window size must be non-zero, got {size}");

        let window = headless.probe.as_ref().map(|p| p.acquire(Resource::Window));

        if headless.fail_context {
            // `window` drops here, releasing the window that was just created.
            return Err(anyhow!("context creation disabled by HeadlessConfig"))
                .context("failed to create graphics context");
        }
        let context = headless.probe.as_ref().map(|p| p.acquire(Resource::Context));

        let handle = HeadlessHandle {
            state: Arc::new(Mutex::new(HeadlessState {
                title: config.title.clone(),
                ..HeadlessState::default()
            })),
        };

        log::debug!("headless window \"{}\" created ({size})", config.title);
        let backend = Self { handle: handle.clone(), button_model: headless.button_model, window, context };
        Ok((backend, handle))
    }
}

impl Backend for HeadlessBackend {
    fn pump_events(&mut self, sink: &mut dyn FnMut(InputEvent)) {
        // Drain under the lock, deliver outside it.
        let events: Vec<InputEvent> = self.handle.lock().events.drain(..).collect();
        for event in events {
            sink(event);
        }
    }

    fn set_title(&mut self, title: &str) {
        self.handle.lock().title = title.to_string();
    }

    fn present(&mut self, frame: &Frame) {
        let presented = PresentedFrame {
            clear: frame.clear_color(),
            items: frame.list().items().to_vec(),
        };
        self.handle.lock().presented.push(presented);
    }

    fn button_model(&self) -> ButtonModel {
        self.button_model
    }

    fn button_down(&self, button: MouseButton) -> bool {
        self.handle.lock().buttons.contains(&button)
    }

    fn key_down(&self, key: Key) -> bool {
        self.handle.lock().keys.contains(&key)
    }

    fn upload_texture(&mut self, image: &ImageData) -> Result<TextureId> {
        let mut state = self.handle.lock();
        anyhow::ensure!(!state.destroyed, "the graphics context has been destroyed");

        state.next_texture += 1;
        let id = TextureId(state.next_texture);
        log::debug!("headless texture {} uploaded ({})", id.0, image.size());
        state.textures.insert(id, image.clone());
        Ok(id)
    }

    fn write_texture_pixel(
        &mut self,
        id: TextureId,
        x: u32,
        y: u32,
        color: Color,
    ) -> std::result::Result<(), DrawError> {
        let mut state = self.handle.lock();
        let image = state.textures.get_mut(&id).ok_or(DrawError::UnknownTexture(id))?;
        image.set_pixel(x, y, color.to_rgba8())
    }

    fn release_texture(&mut self, id: TextureId) -> bool {
        self.handle.lock().textures.remove(&id).is_some()
    }

    fn read_pixel(&mut self, frame: &Frame, x: u32, y: u32) -> Result<Color> {
        let state = self.handle.lock();
        anyhow::ensure!(!state.destroyed, "the graphics context has been destroyed");

        let mut geometry = FrameGeometry::default();
        geometry.build(frame.list());
        let base = frame.clear_color().unwrap_or_else(Color::transparent);
        let texel = |id: TextureId, uv: [f32; 2]| state.textures.get(&id).map(|img| img.sample_nearest(uv));
        Ok(sample_pixel(&geometry, base, x, y, &texel))
    }

    fn destroy(&mut self) {
        if self.window.is_none() && self.context.is_none() && self.handle.is_destroyed() {
            return;
        }
        self.context = None;
        self.window = None;

        let mut state = self.handle.lock();
        state.textures.clear();
        state.destroyed = true;
    }
}

impl Drop for HeadlessBackend {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;

    fn config() -> WindowConfig {
        WindowConfig::new("headless", 64, 48)
    }

    #[test]
    fn probe_counts_window_and_context() {
        let probe = HeadlessProbe::new();
        let headless = HeadlessConfig { probe: Some(probe.clone()), ..HeadlessConfig::default() };

        let (mut backend, handle) = HeadlessBackend::create(&config(), headless).unwrap();
        assert_eq!((probe.live_windows(), probe.live_contexts()), (1, 1));

        backend.destroy();
        assert_eq!((probe.live_windows(), probe.live_contexts()), (0, 0));
        assert!(handle.is_destroyed());

        // Idempotent.
        backend.destroy();
        drop(backend);
        assert_eq!(probe.live_windows(), 0);
    }

    #[test]
    fn failed_context_releases_the_window() {
        let probe = HeadlessProbe::new();
        let headless = HeadlessConfig {
            fail_context: true,
            probe: Some(probe.clone()),
            ..HeadlessConfig::default()
        };

        let err = HeadlessBackend::create(&config(), headless).unwrap_err();
        assert!(format!("{err:#}").contains("failed to create graphics context"));
        assert_eq!((probe.live_windows(), probe.live_contexts()), (0, 0));
    }

    #[test]
    fn pump_drains_in_order() {
        let (mut backend, handle) = HeadlessBackend::create(&config(), HeadlessConfig::default()).unwrap();
        handle.push_events([InputEvent::FocusIn, InputEvent::CloseRequested]);

        let mut seen = Vec::new();
        backend.pump_events(&mut |e| seen.push(e));
        assert_eq!(seen, vec![InputEvent::FocusIn, InputEvent::CloseRequested]);
        assert_eq!(handle.pending_events(), 0);
    }

    #[test]
    fn texture_pixels_are_writable_and_bounded() {
        let (mut backend, handle) = HeadlessBackend::create(&config(), HeadlessConfig::default()).unwrap();
        let id = backend.upload_texture(&ImageData::filled(2, 2, Color::BLACK).unwrap()).unwrap();

        backend.write_texture_pixel(id, 1, 0, Color::rgb(255, 0, 0)).unwrap();
        assert_eq!(handle.texture_pixel(id, 1, 0), Some([255, 0, 0, 255]));

        let err = backend.write_texture_pixel(id, 2, 0, Color::WHITE).unwrap_err();
        assert_eq!(err, DrawError::PixelOutOfBounds { x: 2, y: 0, width: 2, height: 2 });

        assert!(backend.release_texture(id));
        assert!(!backend.release_texture(id));
        assert_eq!(
            backend.write_texture_pixel(id, 0, 0, Color::WHITE),
            Err(DrawError::UnknownTexture(id))
        );
    }

    #[test]
    fn read_pixel_samples_the_frame_and_its_textures() {
        let (mut backend, _handle) = HeadlessBackend::create(&config(), HeadlessConfig::default()).unwrap();
        let id = backend.upload_texture(&ImageData::filled(1, 1, Color::rgb(0, 0, 255)).unwrap()).unwrap();

        let mut frame = Frame::new();
        frame.clear(Color::rgb(10, 20, 30));
        frame.list_mut().push_sprite(id, Rect::new(0.0, 0.0, 8.0, 8.0));

        assert_eq!(backend.read_pixel(&frame, 2, 2).unwrap(), Color::rgb(0, 0, 255));
        assert_eq!(backend.read_pixel(&frame, 20, 2).unwrap(), Color::rgb(10, 20, 30));

        backend.destroy();
        assert!(backend.read_pixel(&frame, 2, 2).is_err());
    }

    #[test]
    fn read_pixel_without_clear_starts_transparent() {
        let (mut backend, _handle) = HeadlessBackend::create(&config(), HeadlessConfig::default()).unwrap();
        let frame = Frame::new();
        assert_eq!(backend.read_pixel(&frame, 0, 0).unwrap(), Color::transparent());
    }
}
