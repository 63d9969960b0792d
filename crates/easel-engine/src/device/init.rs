/// Graphics context options for a native window.
///
/// The defaults target the widest range of drivers: downlevel limits, no
/// optional features, vsync'd presentation.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when the surface offers one.
    ///
    /// Off by default so `Color::rgb(128, ..)` reaches the screen as byte 128,
    /// the way a plain framebuffer behaves.
    pub prefer_srgb: bool,

    /// `Fifo` waits for vertical blank on every `swap_buffers`.
    pub present_mode: wgpu::PresentMode,

    /// Replaced by a supported mode when the surface rejects it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Frames the surface may queue ahead; a hint some backends ignore.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
