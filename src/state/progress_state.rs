//! Progress bar animation state

use std::time::{Duration, Instant};

/// Eased transition of the progress bar between two fill levels
#[derive(Debug, Clone, Copy)]
pub struct ProgressAnimation {
    /// When the current transition started
    pub start_time: Instant,
    /// Fill level the transition started from (0-100)
    pub from: f64,
    /// Fill level the transition is heading to (0-100)
    pub target: f64,
}

impl ProgressAnimation {
    /// Duration of one transition
    const ANIMATION_DURATION: Duration = Duration::from_millis(500);

    pub fn new(initial: f64) -> Self {
        Self {
            start_time: Instant::now(),
            from: initial,
            target: initial,
        }
    }

    /// Displayed fill level at `now`
    pub fn value_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= Self::ANIMATION_DURATION {
            return self.target;
        }
        let progress = elapsed.as_secs_f32() / Self::ANIMATION_DURATION.as_secs_f32();
        // Cubic ease-out for smooth deceleration
        let eased = f64::from(simple_easing::cubic_out(progress));
        self.from + (self.target - self.from) * eased
    }

    /// Retarget the animation, starting from whatever is displayed at `now`
    pub fn set_target(&mut self, target: f64, now: Instant) {
        if (target - self.target).abs() < f64::EPSILON {
            return;
        }
        self.from = self.value_at(now);
        self.target = target;
        self.start_time = now;
    }

    /// Jump straight to `value` without animating
    pub fn snap(&mut self, value: f64) {
        self.from = value;
        self.target = value;
    }

    /// Check if the transition has finished at `now`
    pub fn is_settled(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start_time) >= Self::ANIMATION_DURATION
            || (self.target - self.from).abs() < f64::EPSILON
    }
}

impl Default for ProgressAnimation {
    fn default() -> Self {
        Self::new(0.0)
    }
}
