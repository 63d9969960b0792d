//! Shared GPU types and utilities used by the mesh and sprite renderers.

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn new(viewport: Viewport) -> Self {
        Self {
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

/// Minimum binding size for the viewport uniform buffer.
pub(super) fn viewport_ubo_min_binding_size() -> Option<wgpu::BufferSize> {
    wgpu::BufferSize::new(std::mem::size_of::<ViewportUniform>() as u64)
}

pub(super) fn viewport_bind_group_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: viewport_ubo_min_binding_size(),
        },
        count: None,
    }
}

pub(super) fn triangle_list_primitive() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

/// Growth policy for streamed vertex buffers.
#[inline]
pub(super) fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(256)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_uniform_is_16_bytes() {
        assert_eq!(std::mem::size_of::<ViewportUniform>(), 16);
        assert!(viewport_ubo_min_binding_size().is_some());
    }

    #[test]
    fn viewport_uniform_never_zero_sized() {
        let u = ViewportUniform::new(Viewport::new(0.0, 0.0));
        assert_eq!(u.viewport, [1.0, 1.0]);
    }

    #[test]
    fn capacity_grows_in_powers_of_two() {
        assert_eq!(grown_capacity(1), 256);
        assert_eq!(grown_capacity(300), 512);
    }
}
