//! CPU tessellation of draw commands into triangle lists.
//!
//! Everything here is pure: no GPU objects, so the geometry rules are tested
//! directly. Points are transformed before stroking, which keeps outlines and
//! lines 1px wide regardless of the active scale.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Transform, Vec2};
use crate::paint::Color;
use crate::scene::shapes::{CircleCmd, LineCmd, RectCmd, ShapeCmd, SpriteCmd};
use crate::scene::Vertex;

/// Segments used for filled circles.
const FILLED_CIRCLE_SEGMENTS: usize = 20;
/// Segments used for circle outlines.
const RING_SEGMENTS: usize = 100;

const STROKE_HALF_WIDTH: f32 = 0.5;

/// Colored vertex consumed by the mesh pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct MeshVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4], // premultiplied
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    #[inline]
    fn new(p: Vec2, color: Color) -> Self {
        Self { pos: p.to_array(), color: color.clamped().to_array() }
    }
}

/// Textured vertex consumed by the sprite pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct SpriteVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

impl SpriteVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // uv
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── primitives ────────────────────────────────────────────────────────────

pub(crate) fn rect(cmd: &RectCmd, t: &Transform, out: &mut Vec<MeshVertex>) {
    let r = cmd.rect.normalized();
    if !r.is_finite() {
        return;
    }
    let c = r.corners().map(|p| t.apply(p));

    if cmd.filled {
        if r.is_empty() {
            return;
        }
        quad(c, cmd.color, out);
    } else {
        closed_loop(&c, |_| cmd.color, out);
    }
}

pub(crate) fn circle(cmd: &CircleCmd, t: &Transform, out: &mut Vec<MeshVertex>) {
    if !(cmd.radius > 0.0) || !cmd.center.is_finite() {
        return;
    }

    let segments = if cmd.filled { FILLED_CIRCLE_SEGMENTS } else { RING_SEGMENTS };
    let rim: Vec<Vec2> = (0..segments)
        .map(|i| {
            let theta = std::f32::consts::TAU * i as f32 / segments as f32;
            let (sin, cos) = theta.sin_cos();
            t.apply(cmd.center + Vec2::new(cos, sin) * cmd.radius)
        })
        .collect();

    if cmd.filled {
        let center = t.apply(cmd.center);
        fan(center, &rim, |_| cmd.color, cmd.color, out);
    } else {
        closed_loop(&rim, |_| cmd.color, out);
    }
}

pub(crate) fn line(cmd: &LineCmd, t: &Transform, out: &mut Vec<MeshVertex>) {
    segment(t.apply(cmd.from), t.apply(cmd.to), cmd.color, cmd.color, out);
}

pub(crate) fn shape(cmd: &ShapeCmd, t: &Transform, out: &mut Vec<MeshVertex>) {
    let points: Vec<Vec2> = cmd.vertices.iter().map(|v| t.apply(v.position)).collect();
    let color_of = |i: usize| cmd.vertices[i].color;

    match (cmd.connected, cmd.filled) {
        (true, true) => {
            // Convex fan anchored at the first vertex.
            if points.len() < 3 {
                return;
            }
            fan_from_first(&points, &cmd.vertices, out);
        }
        (true, false) => closed_loop(&points, color_of, out),
        (false, _) => {
            for i in 1..points.len() {
                segment(points[i - 1], points[i], color_of(i - 1), color_of(i), out);
            }
        }
    }
}

/// Two triangles covering `rect` with uv 0..1, in draw order TL, TR, BR, BL.
pub(crate) fn sprite(cmd: &SpriteCmd, t: &Transform) -> Option<[SpriteVertex; 6]> {
    let r: Rect = cmd.rect;
    if r.size.x == 0.0 || r.size.y == 0.0 || !r.is_finite() {
        return None;
    }
    let [tl, tr, br, bl] = r.corners().map(|p| t.apply(p).to_array());
    let v = |pos, uv| SpriteVertex { pos, uv };
    Some([
        v(tl, [0.0, 0.0]),
        v(tr, [1.0, 0.0]),
        v(br, [1.0, 1.0]),
        v(tl, [0.0, 0.0]),
        v(br, [1.0, 1.0]),
        v(bl, [0.0, 1.0]),
    ])
}

// ── helpers ───────────────────────────────────────────────────────────────

fn quad(c: [Vec2; 4], color: Color, out: &mut Vec<MeshVertex>) {
    let [a, b, cc, d] = c.map(|p| MeshVertex::new(p, color));
    out.extend_from_slice(&[a, b, cc, a, cc, d]);
}

/// 1px stroke from `a` to `b`, colors interpolated along the segment.
fn segment(a: Vec2, b: Vec2, ca: Color, cb: Color, out: &mut Vec<MeshVertex>) {
    let d = b - a;
    let len = d.length();
    if !(len > 0.0) || !len.is_finite() {
        return;
    }
    let n = d.perp() * (STROKE_HALF_WIDTH / len);

    let a0 = MeshVertex::new(a + n, ca);
    let a1 = MeshVertex::new(a - n, ca);
    let b0 = MeshVertex::new(b + n, cb);
    let b1 = MeshVertex::new(b - n, cb);
    out.extend_from_slice(&[a0, b0, b1, a0, b1, a1]);
}

fn closed_loop(points: &[Vec2], color_of: impl Fn(usize) -> Color, out: &mut Vec<MeshVertex>) {
    let n = points.len();
    if n < 2 {
        return;
    }
    for i in 0..n {
        let j = (i + 1) % n;
        // Two points form a single segment, not a doubled one.
        if n == 2 && i == 1 {
            break;
        }
        segment(points[i], points[j], color_of(i), color_of(j), out);
    }
}

fn fan(
    center: Vec2,
    rim: &[Vec2],
    color_of: impl Fn(usize) -> Color,
    center_color: Color,
    out: &mut Vec<MeshVertex>,
) {
    let n = rim.len();
    let c = MeshVertex::new(center, center_color);
    for i in 0..n {
        let j = (i + 1) % n;
        out.extend_from_slice(&[
            c,
            MeshVertex::new(rim[i], color_of(i)),
            MeshVertex::new(rim[j], color_of(j)),
        ]);
    }
}

fn fan_from_first(points: &[Vec2], vertices: &[Vertex], out: &mut Vec<MeshVertex>) {
    let first = MeshVertex::new(points[0], vertices[0].color);
    for i in 1..points.len() - 1 {
        out.extend_from_slice(&[
            first,
            MeshVertex::new(points[i], vertices[i].color),
            MeshVertex::new(points[i + 1], vertices[i + 1].color),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::rgb(255, 0, 0)
    }

    fn bounds(vs: &[MeshVertex]) -> (f32, f32, f32, f32) {
        vs.iter().fold(
            (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
            |(x0, y0, x1, y1), v| (x0.min(v.pos[0]), y0.min(v.pos[1]), x1.max(v.pos[0]), y1.max(v.pos[1])),
        )
    }

    // ── rect ──────────────────────────────────────────────────────────────

    #[test]
    fn filled_rect_is_two_triangles() {
        let mut out = Vec::new();
        rect(&RectCmd::new(Rect::new(10.0, 20.0, 30.0, 40.0), red(), true), &Transform::IDENTITY, &mut out);
        assert_eq!(out.len(), 6);
        assert_eq!(bounds(&out), (10.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn outlined_rect_is_four_strokes() {
        let mut out = Vec::new();
        rect(&RectCmd::new(Rect::new(0.0, 0.0, 10.0, 10.0), red(), false), &Transform::IDENTITY, &mut out);
        assert_eq!(out.len(), 4 * 6);
    }

    #[test]
    fn negative_size_rect_is_normalized() {
        let mut out = Vec::new();
        rect(&RectCmd::new(Rect::new(10.0, 10.0, -5.0, -5.0), red(), true), &Transform::IDENTITY, &mut out);
        assert_eq!(bounds(&out), (5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn empty_filled_rect_emits_nothing() {
        let mut out = Vec::new();
        rect(&RectCmd::new(Rect::new(0.0, 0.0, 0.0, 10.0), red(), true), &Transform::IDENTITY, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn transform_moves_geometry() {
        let mut out = Vec::new();
        let t = Transform::translation(100.0, 50.0).with_scale(2.0, 2.0);
        rect(&RectCmd::new(Rect::new(0.0, 0.0, 10.0, 10.0), red(), true), &t, &mut out);
        assert_eq!(bounds(&out), (100.0, 50.0, 120.0, 70.0));
    }

    // ── circle ────────────────────────────────────────────────────────────

    #[test]
    fn filled_circle_uses_fan() {
        let mut out = Vec::new();
        circle(&CircleCmd::new(Vec2::new(50.0, 50.0), 10.0, red(), true), &Transform::IDENTITY, &mut out);
        assert_eq!(out.len(), FILLED_CIRCLE_SEGMENTS * 3);
        let (x0, y0, x1, y1) = bounds(&out);
        assert!((x0 - 40.0).abs() < 1e-3 && (x1 - 60.0).abs() < 1e-3);
        assert!(y0 >= 40.0 - 1e-3 && y1 <= 60.0 + 1e-3);
    }

    #[test]
    fn ring_uses_more_segments() {
        let mut out = Vec::new();
        circle(&CircleCmd::new(Vec2::new(0.0, 0.0), 10.0, red(), false), &Transform::IDENTITY, &mut out);
        assert_eq!(out.len(), RING_SEGMENTS * 6);
    }

    #[test]
    fn non_positive_radius_emits_nothing() {
        let mut out = Vec::new();
        circle(&CircleCmd::new(Vec2::zero(), 0.0, red(), true), &Transform::IDENTITY, &mut out);
        circle(&CircleCmd::new(Vec2::zero(), f32::NAN, red(), true), &Transform::IDENTITY, &mut out);
        assert!(out.is_empty());
    }

    // ── line ──────────────────────────────────────────────────────────────

    #[test]
    fn horizontal_line_is_one_pixel_tall() {
        let mut out = Vec::new();
        let cmd = LineCmd { from: Vec2::new(0.0, 10.0), to: Vec2::new(20.0, 10.0), color: red() };
        line(&cmd, &Transform::IDENTITY, &mut out);
        assert_eq!(bounds(&out), (0.0, 9.5, 20.0, 10.5));
    }

    #[test]
    fn zero_length_line_emits_nothing() {
        let mut out = Vec::new();
        let cmd = LineCmd { from: Vec2::new(3.0, 3.0), to: Vec2::new(3.0, 3.0), color: red() };
        line(&cmd, &Transform::IDENTITY, &mut out);
        assert!(out.is_empty());
    }

    // ── shape ─────────────────────────────────────────────────────────────

    fn triangle(connected: bool, filled: bool) -> ShapeCmd {
        ShapeCmd {
            vertices: vec![
                Vertex::new(Vec2::new(0.0, 0.0), Color::rgb(255, 0, 0)),
                Vertex::new(Vec2::new(10.0, 0.0), Color::rgb(0, 255, 0)),
                Vertex::new(Vec2::new(10.0, 10.0), Color::rgb(0, 0, 255)),
            ],
            connected,
            filled,
        }
    }

    #[test]
    fn filled_shape_is_a_fan_with_vertex_colors() {
        let mut out = Vec::new();
        shape(&triangle(true, true), &Transform::IDENTITY, &mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(out[2].color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn connected_shape_closes_the_loop() {
        let mut out = Vec::new();
        shape(&triangle(true, false), &Transform::IDENTITY, &mut out);
        assert_eq!(out.len(), 3 * 6);
    }

    #[test]
    fn open_shape_is_a_polyline() {
        let mut out = Vec::new();
        shape(&triangle(false, true), &Transform::IDENTITY, &mut out);
        assert_eq!(out.len(), 2 * 6);
    }

    #[test]
    fn degenerate_filled_shape_emits_nothing() {
        let mut cmd = triangle(true, true);
        cmd.vertices.truncate(2);
        let mut out = Vec::new();
        shape(&cmd, &Transform::IDENTITY, &mut out);
        assert!(out.is_empty());
    }

    // ── sprite ────────────────────────────────────────────────────────────

    #[test]
    fn sprite_quad_spans_uv_unit_square() {
        let cmd = SpriteCmd { texture: crate::texture::TextureId(1), rect: Rect::new(5.0, 5.0, 10.0, 20.0) };
        let quad = sprite(&cmd, &Transform::IDENTITY).unwrap();
        assert_eq!(quad[0].pos, [5.0, 5.0]);
        assert_eq!(quad[0].uv, [0.0, 0.0]);
        assert_eq!(quad[2].pos, [15.0, 25.0]);
        assert_eq!(quad[2].uv, [1.0, 1.0]);
    }

    #[test]
    fn zero_sized_sprite_is_skipped() {
        let cmd = SpriteCmd { texture: crate::texture::TextureId(1), rect: Rect::new(0.0, 0.0, 0.0, 5.0) };
        assert!(sprite(&cmd, &Transform::IDENTITY).is_none());
    }
}
