use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick. Zero on the first tick.
    pub dt: Duration,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Per-window frame clock.
///
/// `tick()` is called at the start of every poll. Two readings are offered:
/// - [`FrameClock::framerate`]: rate derived from the time elapsed since the
///   start of the most recent tick. Calling it repeatedly before the next tick
///   yields decreasing rates, because the measured span keeps growing.
/// - [`FrameClock::frame_time`]: the span between the last two ticks.
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_start: Instant,
    frame_index: u64,
    last_dt: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            tick_start: Instant::now(),
            frame_index: 0,
            last_dt: Duration::ZERO,
        }
    }

    /// Records the start of a new tick and returns its `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub(crate) fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = if self.frame_index == 0 {
            Duration::ZERO
        } else {
            now.saturating_duration_since(self.tick_start)
        };

        self.tick_start = now;
        self.last_dt = dt;

        let ft = FrameTime {
            dt,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self
            .frame_index
            .wrapping_add(1);

        ft
    }

    /// Timestamp recorded by the most recent tick.
    pub fn tick_start(&self) -> Instant {
        self.tick_start
    }

    /// Number of ticks recorded so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }

    /// Span between the last two ticks.
    pub fn frame_time(&self) -> Duration {
        self.last_dt
    }

    /// Frames per second measured from the start of the last tick until now.
    pub fn framerate(&self) -> f64 {
        self.framerate_at(Instant::now())
    }

    pub(crate) fn framerate_at(&self, now: Instant) -> f64 {
        rate(now.saturating_duration_since(self.tick_start))
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Inverts a span into a rate; non-positive spans give 0 rather than
/// infinity.
fn rate(dt: Duration) -> f64 {
    let secs = dt.as_secs_f64();
    if secs > 0.0 && secs.is_finite() {
        1.0 / secs
    } else {
        0.0
    }
}
