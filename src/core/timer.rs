//! Delta-driven timers. Each owns its state and is advanced by the caller.

/// One-shot timer that reports completion after a duration
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Countdown {
    /// Create an inactive countdown
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Create a countdown that is already running
    pub fn started(duration: f32) -> Self {
        let mut countdown = Self::new(duration);
        countdown.start();
        countdown
    }

    /// Start or restart from zero
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Advance by delta, returns true on the tick that completes it
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Progress in [0, 1]; a zero-length countdown is always complete
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }
}

/// Fires at most once per interval
#[derive(Debug, Clone, Copy)]
pub struct Throttled {
    min_interval: f32,
    time_since_last: f32,
}

impl Throttled {
    pub fn new(min_interval: f32) -> Self {
        Self {
            min_interval,
            time_since_last: 0.0,
        }
    }

    /// Accumulate delta; returns the accumulated time when the interval elapsed
    pub fn try_tick(&mut self, delta: f32) -> Option<f32> {
        self.time_since_last += delta;

        if self.time_since_last >= self.min_interval {
            let elapsed = self.time_since_last;
            self.time_since_last = 0.0;
            Some(elapsed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_fires_once() {
        let mut timer = Countdown::new(1.0);

        assert!(!timer.tick(0.5)); // inactive

        timer.start();
        assert!(!timer.tick(0.5));
        assert_eq!(timer.progress(), 0.5);

        assert!(timer.tick(0.6));
        assert!(!timer.tick(0.1));
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn countdown_restart_resets_progress() {
        let mut timer = Countdown::started(2.0);
        timer.tick(1.5);
        timer.start();
        assert_eq!(timer.progress(), 0.0);
        assert!(timer.is_active());
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut timer = Countdown::started(0.0);
        assert_eq!(timer.progress(), 1.0);
        assert!(timer.tick(0.0));
    }

    #[test]
    fn throttled_reports_elapsed() {
        let mut timer = Throttled::new(1.0);

        assert_eq!(timer.try_tick(0.6), None);
        let fired = timer.try_tick(0.6).unwrap();
        assert!((fired - 1.2).abs() < 1e-6);
        assert_eq!(timer.try_tick(0.1), None);
    }
}
