use std::ops::Range;

use anyhow::Result;

use crate::paint::Color;
use crate::render::mesh::MeshRenderer;
use crate::render::sprite::SpriteRenderer;
use crate::render::readback;
use crate::render::tessellate::{self, MeshVertex, SpriteVertex};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, Frame};
use crate::texture::TextureId;

/// A contiguous run of same-pipeline geometry in paint order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Batch {
    Mesh(Range<u32>),
    Sprite { texture: TextureId, range: Range<u32> },
}

/// CPU side of one frame: vertex streams plus the batches that reference them.
#[derive(Debug, Default)]
pub(crate) struct FrameGeometry {
    pub mesh: Vec<MeshVertex>,
    pub sprites: Vec<SpriteVertex>,
    pub batches: Vec<Batch>,
}

impl FrameGeometry {
    /// Tessellates `list`, merging neighbouring items that share a pipeline.
    pub(crate) fn build(&mut self, list: &DrawList) {
        self.mesh.clear();
        self.sprites.clear();
        self.batches.clear();

        for item in list.items() {
            if let DrawCmd::Sprite(cmd) = &item.cmd {
                let Some(quad) = tessellate::sprite(cmd, &item.transform) else { continue };
                let start = self.sprites.len() as u32;
                self.sprites.extend_from_slice(&quad);
                let end = self.sprites.len() as u32;

                match self.batches.last_mut() {
                    Some(Batch::Sprite { texture, range }) if *texture == cmd.texture => {
                        range.end = end;
                    }
                    _ => self.batches.push(Batch::Sprite { texture: cmd.texture, range: start..end }),
                }
                continue;
            }

            let start = self.mesh.len() as u32;
            match &item.cmd {
                DrawCmd::Rect(cmd) => tessellate::rect(cmd, &item.transform, &mut self.mesh),
                DrawCmd::Circle(cmd) => tessellate::circle(cmd, &item.transform, &mut self.mesh),
                DrawCmd::Line(cmd) => tessellate::line(cmd, &item.transform, &mut self.mesh),
                DrawCmd::Shape(cmd) => tessellate::shape(cmd, &item.transform, &mut self.mesh),
                DrawCmd::Sprite(_) => {}
            }
            let end = self.mesh.len() as u32;
            if start == end {
                continue;
            }

            match self.batches.last_mut() {
                Some(Batch::Mesh(range)) => range.end = end,
                _ => self.batches.push(Batch::Mesh(start..end)),
            }
        }
    }
}

/// Paints a recorded [`Frame`] in a single render pass.
///
/// Owns the mesh and sprite renderers, and therefore the window's textures.
#[derive(Default)]
pub struct FramePainter {
    mesh: MeshRenderer,
    sprites: SpriteRenderer,
    geometry: FrameGeometry,
}

impl FramePainter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn sprites(&self) -> &SpriteRenderer {
        &self.sprites
    }

    #[inline]
    pub(crate) fn sprites_mut(&mut self) -> &mut SpriteRenderer {
        &mut self.sprites
    }

    pub fn paint(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: &Frame) {
        let load = match frame.clear_color() {
            Some(c) => wgpu::LoadOp::Clear(to_wgpu(c)),
            None => wgpu::LoadOp::Load,
        };
        self.record(ctx, target, frame, load);
    }

    /// Paints `frame` offscreen and returns the colour of pixel (x, y).
    ///
    /// The offscreen target starts as the frame's clear colour, or transparent
    /// black when the frame has none. Blocks until the GPU has finished.
    pub(crate) fn read_pixel(&mut self, ctx: &RenderCtx<'_>, frame: &Frame, x: u32, y: u32) -> Result<Color> {
        let texture = readback::offscreen_target(ctx);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("easel readback encoder"),
        });

        let clear = frame.clear_color().unwrap_or_else(Color::transparent);
        {
            let mut target = RenderTarget { encoder: &mut encoder, color_view: &view };
            self.record(ctx, &mut target, frame, wgpu::LoadOp::Clear(to_wgpu(clear)));
        }

        let texel = readback::read_texel(ctx, encoder, &texture, x, y)?;
        readback::decode_texel(ctx.surface_format, texel)
    }

    fn record(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: &Frame,
        load: wgpu::LoadOp<wgpu::Color>,
    ) {
        self.geometry.build(frame.list());
        self.mesh.prepare(ctx, &self.geometry.mesh);
        self.sprites.prepare(ctx, &self.geometry.sprites);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("easel frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations { load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for batch in &self.geometry.batches {
            match batch {
                Batch::Mesh(range) => self.mesh.draw(&mut rpass, range.clone()),
                Batch::Sprite { texture, range } => {
                    self.sprites.draw(&mut rpass, *texture, range.clone())
                }
            }
        }
    }
}

fn to_wgpu(c: Color) -> wgpu::Color {
    let c = c.clamped();
    wgpu::Color { r: c.r as f64, g: c.g as f64, b: c.b as f64, a: c.a as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};

    fn build(list: &DrawList) -> FrameGeometry {
        let mut geo = FrameGeometry::default();
        geo.build(list);
        geo
    }

    #[test]
    fn neighbouring_meshes_share_a_batch() {
        let mut list = DrawList::new();
        list.push_solid_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
        list.push_line(Vec2::zero(), Vec2::new(4.0, 0.0), Color::WHITE);

        let geo = build(&list);
        assert_eq!(geo.batches, vec![Batch::Mesh(0..12)]);
    }

    #[test]
    fn sprites_split_mesh_batches_in_paint_order() {
        let mut list = DrawList::new();
        list.push_solid_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
        list.push_sprite(TextureId(7), Rect::new(0.0, 0.0, 8.0, 8.0));
        list.push_sprite(TextureId(7), Rect::new(8.0, 0.0, 8.0, 8.0));
        list.push_solid_rect(Rect::new(4.0, 4.0, 4.0, 4.0), Color::WHITE);

        let geo = build(&list);
        assert_eq!(
            geo.batches,
            vec![
                Batch::Mesh(0..6),
                Batch::Sprite { texture: TextureId(7), range: 0..12 },
                Batch::Mesh(6..12),
            ]
        );
    }

    #[test]
    fn different_textures_do_not_merge() {
        let mut list = DrawList::new();
        list.push_sprite(TextureId(1), Rect::new(0.0, 0.0, 8.0, 8.0));
        list.push_sprite(TextureId(2), Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(build(&list).batches.len(), 2);
    }

    #[test]
    fn empty_items_produce_no_batches() {
        let mut list = DrawList::new();
        list.push_circle(Vec2::zero(), 0.0, Color::WHITE, true);
        assert!(build(&list).batches.is_empty());
    }

    #[test]
    fn clear_color_is_premultiplied_and_clamped() {
        let c = to_wgpu(Color::rgba(255, 255, 255, 0));
        assert_eq!((c.r, c.a), (0.0, 0.0));
    }
}
