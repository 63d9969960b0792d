use std::sync::mpsc::{Receiver, TryRecvError};

use anyhow::{Context, Result};

use crate::device::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
use crate::input::{ButtonModel, InputEvent, Key, MouseButton, GLOBAL_KEYS};
use crate::paint::Color;
use crate::platform::Backend;
use crate::render::{FramePainter, RenderCtx, RenderTarget};
use crate::scene::{DrawError, Frame};
use crate::texture::{ImageData, TextureId};
use crate::window::WindowConfig;

use super::event_loop::{platform, WindowLink, WindowRequest};

/// winit window + wgpu context.
///
/// Field order matters on teardown: the graphics context goes before the
/// window link, which is what `destroy` enforces explicitly.
pub struct NativeBackend {
    gpu: Option<Gpu>,
    painter: FramePainter,
    link: Option<WindowLink>,
    /// Presenting hit an unrecoverable surface error.
    present_failed: bool,
    /// The platform thread went away and a close was already reported.
    disconnected: bool,
}

impl NativeBackend {
    /// Opens a native window and attaches a graphics context to it.
    ///
    /// Either both stages succeed or nothing stays allocated.
    pub fn create(config: &WindowConfig, gpu_init: GpuInit) -> Result<Self> {
        let size = config.geometry();
        anyhow::ensure!(size.is_valid(), "window size must be non-zero, got {size}");

        let link = platform()?
            .create_window(WindowRequest { title: config.title.clone(), size })
            .context("failed to create native window")?;

        let gpu = pollster::block_on(Gpu::new(link.window().clone(), size, gpu_init))
            .context("failed to create graphics context")?;

        Ok(Self {
            gpu: Some(gpu),
            painter: FramePainter::new(),
            link: Some(link),
            present_failed: false,
            disconnected: false,
        })
    }
}

impl Backend for NativeBackend {
    fn pump_events(&mut self, sink: &mut dyn FnMut(InputEvent)) {
        let Some(link) = self.link.as_ref() else { return };
        drain_events(link.events(), &mut self.disconnected, sink);
    }

    fn set_title(&mut self, title: &str) {
        if let Some(link) = self.link.as_ref() {
            link.window().set_title(title);
        }
    }

    fn present(&mut self, frame: &Frame) {
        if self.present_failed {
            return;
        }
        let (Some(gpu), Some(link)) = (self.gpu.as_mut(), self.link.as_ref()) else {
            return;
        };

        let gpu_frame = match gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Reconfigured => log::warn!("surface lost; reconfigured, frame dropped"),
                    SurfaceErrorAction::SkipFrame => log::warn!("surface unavailable; frame dropped"),
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface out of memory; presenting disabled for this window");
                        self.present_failed = true;
                    }
                }
                return;
            }
        };

        let GpuFrame { surface_texture, view, mut encoder } = gpu_frame;
        {
            let ctx = RenderCtx::for_gpu(gpu);
            let mut target = RenderTarget { encoder: &mut encoder, color_view: &view };
            self.painter.paint(&ctx, &mut target, frame);
        }

        link.window().pre_present_notify();
        gpu.submit(GpuFrame { surface_texture, view, encoder });
    }

    fn button_model(&self) -> ButtonModel {
        ButtonModel::platform_default()
    }

    fn button_down(&self, button: MouseButton) -> bool {
        self.link.as_ref().is_some_and(|link| link.button_down(button))
    }

    fn key_down(&self, key: Key) -> bool {
        GLOBAL_KEYS.is_down(key)
    }

    fn upload_texture(&mut self, image: &ImageData) -> Result<TextureId> {
        let gpu = self.gpu.as_ref().context("the graphics context has been destroyed")?;
        self.painter.sprites_mut().upload(gpu.device(), gpu.queue(), image)
    }

    fn write_texture_pixel(
        &mut self,
        id: TextureId,
        x: u32,
        y: u32,
        color: Color,
    ) -> std::result::Result<(), DrawError> {
        let Some(gpu) = self.gpu.as_ref() else {
            return Err(DrawError::UnknownTexture(id));
        };
        self.painter.sprites().write_pixel(gpu.queue(), id, x, y, color.to_rgba8())
    }

    fn release_texture(&mut self, id: TextureId) -> bool {
        self.painter.sprites_mut().release(id)
    }

    fn read_pixel(&mut self, frame: &Frame, x: u32, y: u32) -> Result<Color> {
        let gpu = self.gpu.as_ref().context("the graphics context has been destroyed")?;
        let ctx = RenderCtx::for_gpu(gpu);
        self.painter.read_pixel(&ctx, frame, x, y)
    }

    fn destroy(&mut self) {
        if self.gpu.is_none() && self.link.is_none() {
            return;
        }
        let textures = self.painter.sprites().texture_count();
        self.painter = FramePainter::new();
        self.gpu = None;
        self.link = None;
        log::debug!("native window destroyed ({textures} textures released)");
    }
}

impl Drop for NativeBackend {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Forwards queued events to `sink` without blocking.
///
/// A disconnected channel means the platform thread is gone; that is reported
/// once as a close request, tracked through `disconnected`.
fn drain_events(events: &Receiver<InputEvent>, disconnected: &mut bool, sink: &mut dyn FnMut(InputEvent)) {
    loop {
        match events.try_recv() {
            Ok(event) => sink(event),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                if !*disconnected {
                    *disconnected = true;
                    log::warn!("platform event loop disconnected; treating as close request");
                    sink(InputEvent::CloseRequested);
                }
                break;
            }
        }
    }
}
