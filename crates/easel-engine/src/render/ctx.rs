use crate::coords::Viewport;
use crate::device::Gpu;

/// What a renderer needs from the graphics context for one frame.
#[derive(Copy, Clone)]
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Framebuffer size in pixels.
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    pub fn for_gpu(gpu: &'a Gpu) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            surface_format: gpu.surface_format(),
            viewport: gpu.viewport(),
        }
    }
}

/// The frame being recorded: its encoder and the surface view it paints.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}
