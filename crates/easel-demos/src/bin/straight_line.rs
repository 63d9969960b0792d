//! A line from the window centre towards the pointer, stretched to the edge.

use anyhow::Result;
use easel_engine::coords::Vec2;
use easel_engine::core::run_app;
use easel_engine::logging::{init_logging, LoggingConfig};
use easel_engine::paint::Color;
use easel_engine::scene::{Shape, Vertex};
use easel_engine::{App, AppControl, Renderer};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

struct StraightLine {
    line: Shape,
}

impl StraightLine {
    fn new() -> Self {
        let mut line = Shape::new();
        line.add_vertex(Vertex::new(centre(), Color::rgb(255, 255, 164)));
        line.add_vertex(Vertex::new(centre(), Color::rgb(154, 210, 1)));
        line.set_connected(false);
        Self { line }
    }
}

fn centre() -> Vec2 {
    Vec2::new((WIDTH / 2) as f32, (HEIGHT / 2) as f32)
}

/// Projects a direction from the centre onto the top or bottom edge; pure
/// horizontal and vertical directions hit the nearest side.
fn edge_point(dir: Vec2) -> Vec2 {
    let half_w = (WIDTH / 2) as f32;
    let half_h = (HEIGHT / 2) as f32;

    if dir.y == 0.0 {
        Vec2::new(sign(dir.x) * half_w, 0.0)
    } else if dir.x == 0.0 {
        Vec2::new(0.0, sign(dir.y) * half_h)
    } else {
        let y = sign(dir.y) * half_h;
        Vec2::new(dir.x * (y / dir.y), y)
    }
}

fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl App for StraightLine {
    fn on_update(&mut self, renderer: &mut Renderer) -> AppControl {
        renderer.begin_frame();
        renderer.clear(Color::BLACK);

        let target = centre() + edge_point(renderer.pointer_position() - centre());
        if let Err(e) = self.line.update_vertex(1, Vertex::new(target, Color::rgb(154, 210, 1))) {
            log::error!("{e}");
            return AppControl::Exit;
        }
        renderer.draw_shape(&self.line);

        let title = format!("{:.2} ms", renderer.get_framerate());
        renderer.set_title(title);

        renderer.swap_buffers();
        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut renderer = Renderer::new(WIDTH, HEIGHT)?;
    run_app(&mut renderer, &mut StraightLine::new());
    Ok(())
}
