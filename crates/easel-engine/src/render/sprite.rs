use std::collections::HashMap;
use std::ops::Range;

use crate::coords::Geometry;
use crate::render::tessellate::SpriteVertex;
use crate::render::RenderCtx;
use crate::scene::DrawError;
use crate::texture::{ImageData, TextureId};

use super::common::{
    grown_capacity, premul_alpha_blend, triangle_list_primitive, viewport_bind_group_layout_entry,
    ViewportUniform,
};

/// Uploaded RGBA8 texture plus its sampling bind group.
struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    size: Geometry,
}

/// Renderer for textured quads; also owns every texture uploaded for its window.
///
/// Textures are stored as `Rgba8Unorm` with straight alpha and sampled with
/// linear filtering and repeat addressing.
#[derive(Default)]
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    viewport_bgl: Option<wgpu::BindGroupLayout>,
    viewport_bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    texture_bgl: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,

    textures: HashMap<TextureId, GpuTexture>,
    next_id: u32,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    // ── textures ───────────────────────────────────────────────────────────

    /// Uploads `image` and returns its id.
    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &ImageData,
    ) -> anyhow::Result<TextureId> {
        self.ensure_texture_layout(device);
        let (Some(layout), Some(sampler)) = (self.texture_bgl.as_ref(), self.sampler.as_ref()) else {
            anyhow::bail!("sprite texture layout is unavailable");
        };

        let size = image.size();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("easel sprite texture"),
            size: extent(size),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * size.width),
                rows_per_image: Some(size.height),
            },
            extent(size),
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = texture_bind_group(device, layout, sampler, &view);

        self.next_id = self.next_id.wrapping_add(1);
        let id = TextureId(self.next_id);
        self.textures.insert(id, GpuTexture { texture, bind_group, size });
        log::debug!("uploaded texture {} ({size})", id.0);
        Ok(id)
    }

    /// Overwrites a single texel with straight-alpha RGBA bytes.
    pub(crate) fn write_pixel(
        &self,
        queue: &wgpu::Queue,
        id: TextureId,
        x: u32,
        y: u32,
        rgba: [u8; 4],
    ) -> Result<(), DrawError> {
        let tex = self.textures.get(&id).ok_or(DrawError::UnknownTexture(id))?;
        if !tex.size.contains(x, y) {
            return Err(DrawError::PixelOutOfBounds {
                x,
                y,
                width: tex.size.width,
                height: tex.size.height,
            });
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &tex.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d { width: 1, height: 1, depth_or_array_layers: 1 },
        );
        Ok(())
    }

    /// Frees the GPU texture. Returns `false` for unknown ids.
    pub(crate) fn release(&mut self, id: TextureId) -> bool {
        self.textures.remove(&id).is_some()
    }

    #[inline]
    pub(crate) fn texture_count(&self) -> usize {
        self.textures.len()
    }

    // ── frame ──────────────────────────────────────────────────────────────

    pub(crate) fn prepare(&mut self, ctx: &RenderCtx<'_>, vertices: &[SpriteVertex]) {
        if vertices.is_empty() {
            return;
        }

        self.ensure_texture_layout(ctx.device);
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_vertex_capacity(ctx, vertices.len());

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
        }
        if let Some(vbo) = self.vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(vertices));
        }
    }

    /// Draws a range of the last prepared vertices sampling `texture`.
    ///
    /// A texture released after the draw was recorded is skipped.
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, texture: TextureId, range: Range<u32>) {
        let Some(tex) = self.textures.get(&texture) else {
            log::debug!("skipping sprite with released texture {}", texture.0);
            return;
        };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(viewport_bind_group) = self.viewport_bind_group.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, viewport_bind_group, &[]);
        rpass.set_bind_group(1, &tex.bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(range, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_texture_layout(&mut self, device: &wgpu::Device) {
        if self.texture_bgl.is_some() && self.sampler.is_some() {
            return;
        }

        self.texture_bgl = Some(device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("easel sprite texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        }));

        self.sampler = Some(device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("easel sprite sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(texture_bgl) = self.texture_bgl.as_ref() else { return };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("easel sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let viewport_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("easel sprite viewport bgl"),
            entries: &[viewport_bind_group_layout_entry(0)],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("easel sprite pipeline layout"),
            bind_group_layouts: &[&viewport_bgl, texture_bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("easel sprite pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[SpriteVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: triangle_list_primitive(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.viewport_bgl = Some(viewport_bgl);
        self.viewport_bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport_bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.viewport_bgl.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("easel sprite viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("easel sprite viewport bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.viewport_bind_group = Some(bind_group);
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }
        let new_cap = grown_capacity(required);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("easel sprite vbo"),
            size: (new_cap * std::mem::size_of::<SpriteVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}

#[inline]
fn extent(size: Geometry) -> wgpu::Extent3d {
    wgpu::Extent3d { width: size.width, height: size.height, depth_or_array_layers: 1 }
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    view: &wgpu::TextureView,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("easel sprite texture bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
