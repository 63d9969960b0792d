//! Draws an image file; a left click paints every texel of it purple.
//!
//! Usage: `loading_image [PATH]` (defaults to `cubes.png`).

use anyhow::{Context, Result};
use easel_engine::coords::Vec2;
use easel_engine::input::MouseButton;
use easel_engine::logging::{init_logging, LoggingConfig};
use easel_engine::paint::Color;
use easel_engine::Renderer;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let path = std::env::args().nth(1).unwrap_or_else(|| "cubes.png".to_string());

    let mut renderer = Renderer::new(WIDTH, HEIGHT)?;
    let texture = renderer
        .load_texture(&path)
        .with_context(|| format!("cannot show {path}"))?;
    log::info!("loaded {path} ({})", texture.size());

    let fill = Color::rgb(100, 0, 255);

    while renderer.is_running() {
        renderer.begin_frame();
        renderer.clear(Color::BLACK);
        renderer.draw_texture(
            &texture,
            Vec2::new(100.0, 100.0),
            Vec2::new((WIDTH / 2) as f32, (HEIGHT / 2) as f32),
        );

        if renderer.button_pressed(MouseButton::Left) {
            let size = texture.size();
            for y in 0..size.height {
                for x in 0..size.width {
                    renderer.set_texture_pixel(&texture, x, y, fill)?;
                }
            }
        }

        let title = format!("{:.2} ms", renderer.get_framerate());
        renderer.set_title(title);
        renderer.swap_buffers();
    }

    Ok(())
}
