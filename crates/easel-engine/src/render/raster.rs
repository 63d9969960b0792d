//! CPU point sampling of tessellated frames.
//!
//! Answers "what colour ends up at this pixel" for backends without a GPU.
//! Coverage is tested at the pixel centre. Triangles blend in paint order with
//! premultiplied source-over.

use crate::paint::Color;
use crate::render::tessellate::{MeshVertex, SpriteVertex};
use crate::render::{Batch, FrameGeometry};
use crate::texture::TextureId;

/// Colour of pixel (x, y) after painting `geometry` over `base`.
///
/// `texel` returns the premultiplied colour of a texture at a normalized
/// coordinate, or `None` for textures that no longer exist.
pub(crate) fn sample_pixel(
    geometry: &FrameGeometry,
    base: Color,
    x: u32,
    y: u32,
    texel: &dyn Fn(TextureId, [f32; 2]) -> Option<Color>,
) -> Color {
    let p = [x as f32 + 0.5, y as f32 + 0.5];
    let mut dst = base;

    for batch in &geometry.batches {
        match batch {
            Batch::Mesh(range) => {
                let tris = &geometry.mesh[range.start as usize..range.end as usize];
                for tri in tris.chunks_exact(3) {
                    if let Some(src) = shade_mesh(tri, p) {
                        dst = src.clamped().over(dst);
                    }
                }
            }
            Batch::Sprite { texture, range } => {
                let tris = &geometry.sprites[range.start as usize..range.end as usize];
                for tri in tris.chunks_exact(3) {
                    let Some(uv) = sprite_uv(tri, p) else { continue };
                    if let Some(src) = texel(*texture, uv) {
                        dst = src.clamped().over(dst);
                    }
                }
            }
        }
    }
    dst
}

fn shade_mesh(tri: &[MeshVertex], p: [f32; 2]) -> Option<Color> {
    let w = coverage([tri[0].pos, tri[1].pos, tri[2].pos], p)?;
    if tri[0].color == tri[1].color && tri[1].color == tri[2].color {
        let [r, g, b, a] = tri[0].color;
        return Some(Color::from_premul(r, g, b, a));
    }
    let mix = |i: usize| w[0] * tri[0].color[i] + w[1] * tri[1].color[i] + w[2] * tri[2].color[i];
    Some(Color::from_premul(mix(0), mix(1), mix(2), mix(3)))
}

fn sprite_uv(tri: &[SpriteVertex], p: [f32; 2]) -> Option<[f32; 2]> {
    let w = coverage([tri[0].pos, tri[1].pos, tri[2].pos], p)?;
    let mix = |i: usize| w[0] * tri[0].uv[i] + w[1] * tri[1].uv[i] + w[2] * tri[2].uv[i];
    Some([mix(0), mix(1)])
}

/// Normalized barycentric weights of `p`, or `None` when it is outside.
///
/// A point on an edge shared by two triangles belongs to exactly one of them,
/// so seams are neither skipped nor blended twice.
fn coverage(v: [[f32; 2]; 3], p: [f32; 2]) -> Option<[f32; 3]> {
    let area = edge(v[0], v[1], v[2]);
    if area == 0.0 || !area.is_finite() {
        return None;
    }
    let sign = area.signum();

    // Weight of vertex i is the edge opposite it.
    let mut w = [0.0; 3];
    for i in 0..3 {
        let a = v[(i + 1) % 3];
        let b = v[(i + 2) % 3];
        let e = edge(a, b, p) * sign;
        if e < 0.0 || (e == 0.0 && !owns_edge(a, b, sign)) {
            return None;
        }
        w[i] = e;
    }

    let total = area.abs();
    Some(w.map(|e| e / total))
}

fn edge(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

/// Tie rule for points exactly on an edge. Neighbours walk a shared edge in
/// opposite directions, so exactly one of them owns it.
fn owns_edge(a: [f32; 2], b: [f32; 2], sign: f32) -> bool {
    let dx = (b[0] - a[0]) * sign;
    let dy = (b[1] - a[1]) * sign;
    dy < 0.0 || (dy == 0.0 && dx > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::scene::DrawList;

    fn geometry(list: &DrawList) -> FrameGeometry {
        let mut geo = FrameGeometry::default();
        geo.build(list);
        geo
    }

    fn no_textures(_: TextureId, _: [f32; 2]) -> Option<Color> {
        None
    }

    // ── coverage ──────────────────────────────────────────────────────────

    #[test]
    fn pixels_outside_every_shape_keep_the_base() {
        let mut list = DrawList::new();
        list.push_solid_rect(Rect::new(10.0, 10.0, 5.0, 5.0), Color::WHITE);
        let geo = geometry(&list);

        assert_eq!(sample_pixel(&geo, Color::BLACK, 0, 0, &no_textures), Color::BLACK);
        assert_eq!(sample_pixel(&geo, Color::BLACK, 15, 12, &no_textures), Color::BLACK);
        assert_eq!(sample_pixel(&geo, Color::BLACK, 14, 14, &no_textures), Color::WHITE);
    }

    #[test]
    fn translucent_quads_are_blended_once_on_the_diagonal() {
        let mut list = DrawList::new();
        list.push_solid_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::from_premul(0.0, 0.0, 0.5, 0.5));
        let geo = geometry(&list);

        // (5, 5) has its centre on the split between the quad's triangles.
        let c = sample_pixel(&geo, Color::BLACK, 5, 5, &no_textures);
        assert_eq!(c, Color::from_premul(0.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn later_items_paint_over_earlier_ones() {
        let mut list = DrawList::new();
        list.push_solid_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::rgb(255, 0, 0));
        list.push_solid_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::rgb(0, 255, 0));
        let geo = geometry(&list);

        assert_eq!(sample_pixel(&geo, Color::BLACK, 1, 1, &no_textures), Color::rgb(0, 255, 0));
        assert_eq!(sample_pixel(&geo, Color::BLACK, 6, 6, &no_textures), Color::rgb(255, 0, 0));
    }

    #[test]
    fn degenerate_triangles_cover_nothing() {
        assert_eq!(coverage([[0.0, 0.0], [4.0, 4.0], [8.0, 8.0]], [2.5, 2.5]), None);
    }

    // ── sprites ───────────────────────────────────────────────────────────

    #[test]
    fn sprites_sample_by_uv() {
        let mut list = DrawList::new();
        list.push_sprite(TextureId(3), Rect::new(0.0, 0.0, 4.0, 4.0));
        let geo = geometry(&list);

        let left_half_red = |id: TextureId, uv: [f32; 2]| {
            assert_eq!(id, TextureId(3));
            Some(if uv[0] < 0.5 { Color::rgb(255, 0, 0) } else { Color::WHITE })
        };
        assert_eq!(sample_pixel(&geo, Color::BLACK, 0, 2, &left_half_red), Color::rgb(255, 0, 0));
        assert_eq!(sample_pixel(&geo, Color::BLACK, 3, 2, &left_half_red), Color::WHITE);
    }

    #[test]
    fn released_textures_are_skipped() {
        let mut list = DrawList::new();
        list.push_sprite(TextureId(3), Rect::new(0.0, 0.0, 4.0, 4.0));
        let geo = geometry(&list);
        assert_eq!(sample_pixel(&geo, Color::BLACK, 1, 1, &no_textures), Color::BLACK);
    }

    #[test]
    fn lines_cover_the_pixel_they_run_through() {
        let mut list = DrawList::new();
        list.push_line(Vec2::new(0.0, 5.5), Vec2::new(10.0, 5.5), Color::WHITE);
        let geo = geometry(&list);

        assert_eq!(sample_pixel(&geo, Color::BLACK, 4, 5, &no_textures), Color::WHITE);
        assert_eq!(sample_pixel(&geo, Color::BLACK, 4, 7, &no_textures), Color::BLACK);
    }
}
