use std::time::Instant;

/// Longest frame step handed to the simulator, in seconds
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Wall-clock source of frame deltas
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    max_delta: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self::with_max_delta(MAX_FRAME_DELTA)
    }

    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            last_tick: Instant::now(),
            max_delta,
        }
    }

    /// Seconds since the previous tick, capped at the max delta
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta.min(self.max_delta)
    }

    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
