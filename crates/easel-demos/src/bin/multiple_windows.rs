//! Two windows, each on its own thread, drawing under the pointer while focused.

use anyhow::Result;
use easel_engine::coords::Vec2;
use easel_engine::input::Key;
use easel_engine::logging::{init_logging, LoggingConfig};
use easel_engine::paint::Color;
use easel_engine::platform;
use easel_engine::{AppControl, Renderer, WindowConfig, WindowSet};

const SIZE: u32 = 400;

fn circle_window(renderer: &mut Renderer) -> AppControl {
    if renderer.is_focused() {
        renderer.begin_frame();
        renderer.clear(Color::BLACK);
        renderer.draw_circle(renderer.pointer_position(), 50.0, Color::rgb(100, 140, 210), true);

        if renderer.key_pressed(Key::A) {
            log::info!("Window 1: A!!");
        }
        renderer.swap_buffers();
    }
    AppControl::Continue
}

fn square_window(renderer: &mut Renderer) -> AppControl {
    if renderer.is_focused() {
        renderer.begin_frame();
        renderer.clear(Color::BLACK);
        renderer.draw_rectangle(renderer.pointer_position(), Vec2::new(100.0, 100.0), Color::rgb(240, 180, 2), true);

        if renderer.key_pressed(Key::A) {
            log::info!("Window 2: A!!");
        }
        renderer.swap_buffers();
    }
    AppControl::Continue
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    platform::init()?;

    let mut windows = WindowSet::new();
    windows
        .add_window(WindowConfig::new("Hello from Window 1!", SIZE, SIZE), || circle_window)
        .add_window(WindowConfig::new("Hello from Window 2!", SIZE, SIZE), || square_window);
    windows.run()
}
