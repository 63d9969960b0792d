//! Bubble sort over random bars, one comparison per frame.

use anyhow::Result;
use easel_engine::coords::Vec2;
use easel_engine::logging::{init_logging, LoggingConfig};
use easel_engine::paint::Color;
use easel_engine::{App, AppControl, WindowConfig, WindowSet, Renderer};
use rand::Rng;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const BAR_WIDTH: u32 = 10;
const BAR_GAP: u32 = 2;

/// Bubble sort that yields after each comparison.
#[derive(Debug, Clone)]
struct SortState {
    heights: Vec<u32>,
    i: usize,
    j: usize,
}

impl SortState {
    fn new(heights: Vec<u32>) -> Self {
        Self { heights, i: 0, j: 0 }
    }

    fn random(count: usize, max: u32) -> Self {
        let mut rng = rand::thread_rng();
        Self::new((0..count).map(|_| rng.gen_range(1..=max)).collect())
    }

    fn is_done(&self) -> bool {
        self.heights.len() < 2 || self.i >= self.heights.len() - 1
    }

    /// Compares bar `j` with its neighbour and advances. Returns the index
    /// that was compared.
    fn step(&mut self) -> Option<usize> {
        if self.is_done() {
            return None;
        }
        let j = self.j;
        if self.heights[j] > self.heights[j + 1] {
            self.heights.swap(j, j + 1);
        }

        self.j += 1;
        if self.j >= self.heights.len() - self.i - 1 {
            self.j = 0;
            self.i += 1;
        }
        Some(j)
    }
}

struct BubbleSort {
    sort: SortState,
}

impl App for BubbleSort {
    fn on_update(&mut self, renderer: &mut Renderer) -> AppControl {
        let (i, j) = (self.sort.i, self.sort.j);
        let current = self.sort.step();
        if current.is_some() {
            renderer.set_title(format!("Iteration I: {i}  J: {j}"));
        }

        renderer.begin_frame();
        renderer.clear(Color::BLACK);
        for (index, &height) in self.sort.heights.iter().enumerate() {
            let color = if Some(index) == current {
                Color::rgb(200, 200, 200)
            } else {
                Color::rgb(200, 100, 0)
            };
            let x = (index as u32 * (BAR_WIDTH + BAR_GAP)) as f32;
            renderer.draw_rectangle(Vec2::new(x, 0.0), Vec2::new(BAR_WIDTH as f32, height as f32), color, true);
        }
        renderer.swap_buffers();

        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let bars = WIDTH.div_ceil(BAR_WIDTH + BAR_GAP) as usize;
    let mut windows = WindowSet::new();
    windows.add_window(WindowConfig::new("Bubble sort", WIDTH, HEIGHT), move || BubbleSort {
        sort: SortState::random(bars, HEIGHT),
    });
    windows.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_ascending() {
        let mut sort = SortState::new(vec![5, 1, 4, 2, 8, 3]);
        let mut steps = 0;
        while sort.step().is_some() {
            steps += 1;
        }
        assert_eq!(sort.heights, vec![1, 2, 3, 4, 5, 8]);
        // n(n-1)/2 comparisons.
        assert_eq!(steps, 15);
    }

    #[test]
    fn short_inputs_are_already_done() {
        assert!(SortState::new(vec![]).is_done());
        assert!(SortState::new(vec![3]).is_done());
        assert_eq!(SortState::new(vec![3]).step(), None);
    }

    #[test]
    fn random_heights_stay_in_range() {
        let sort = SortState::random(67, HEIGHT);
        assert_eq!(sort.heights.len(), 67);
        assert!(sort.heights.iter().all(|&h| (1..=HEIGHT).contains(&h)));
    }
}
