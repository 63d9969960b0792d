//! Single-pixel framebuffer readback.

use std::sync::mpsc;

use anyhow::{bail, Context, Result};

use crate::paint::Color;
use crate::render::RenderCtx;

/// Offscreen colour target in the surface format, copyable to a buffer.
pub(crate) fn offscreen_target(ctx: &RenderCtx<'_>) -> wgpu::Texture {
    ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("easel readback target"),
        size: wgpu::Extent3d {
            width: ctx.viewport.width as u32,
            height: ctx.viewport.height as u32,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: ctx.surface_format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}

/// Submits `encoder` plus a copy of texel (x, y) and blocks until the bytes
/// are on the CPU.
pub(crate) fn read_texel(
    ctx: &RenderCtx<'_>,
    mut encoder: wgpu::CommandEncoder,
    texture: &wgpu::Texture,
    x: u32,
    y: u32,
) -> Result<[u8; 4]> {
    let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("easel readback buffer"),
        size: wgpu::COPY_BYTES_PER_ROW_ALIGNMENT as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d { x, y, z: 0 },
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT),
                rows_per_image: Some(1),
            },
        },
        wgpu::Extent3d { width: 1, height: 1, depth_or_array_layers: 1 },
    );
    ctx.queue.submit(Some(encoder.finish()));

    let slice = buffer.slice(..);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |mapped| {
        let _ = tx.send(mapped);
    });
    ctx.device
        .poll(wgpu::PollType::wait_indefinitely())
        .context("GPU poll failed while reading a pixel")?;
    rx.recv()
        .context("readback mapping was dropped")?
        .context("failed to map the readback buffer")?;

    let texel = {
        let data = slice.get_mapped_range();
        [data[0], data[1], data[2], data[3]]
    };
    buffer.unmap();
    Ok(texel)
}

/// Turns a texel of `format` back into the premultiplied colour that was
/// written to it.
pub(crate) fn decode_texel(format: wgpu::TextureFormat, texel: [u8; 4]) -> Result<Color> {
    use wgpu::TextureFormat as F;

    let [r, g, b, a] = match format {
        F::Rgba8Unorm | F::Rgba8UnormSrgb => texel,
        F::Bgra8Unorm | F::Bgra8UnormSrgb => [texel[2], texel[1], texel[0], texel[3]],
        other => bail!("reading pixels from a {other:?} surface is not supported"),
    };

    let unorm = |v: u8| v as f32 / 255.0;
    let channel = |v: u8| if format.is_srgb() { srgb_to_linear(unorm(v)) } else { unorm(v) };
    Ok(Color::from_premul(channel(r), channel(g), channel(b), unorm(a)))
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
