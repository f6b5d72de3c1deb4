//! Per-frame delta time.

use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,
    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Measures wall-clock time between render loop iterations.
///
/// Delta time is capped so a stall (window drag, debugger break) does not
/// turn into one huge camera step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_max: Duration,
}

impl FrameClock {
    /// Largest delta time a single tick reports.
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

    /// A clock whose first tick measures from now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// A clock whose first tick measures from `start`.
    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last: start,
            frame_index: 0,
            dt_max: Self::DEFAULT_DT_MAX,
        }
    }

    /// Advance to the current time.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advance to `now`. Time never runs backwards: an earlier `now`
    /// yields a zero delta.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
