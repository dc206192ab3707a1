//! Time management utilities
//!
//! Nothing here suspends: waits are expressed as state advanced once per
//! tick by the caller.

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(elapsed.as_secs_f32());
    }

    /// Step by a fixed amount instead of wall-clock time (simulation, replay)
    pub fn advance(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// One-shot deadline advanced explicitly by the owner's tick
///
/// # Examples
/// ```
/// # use umi3d_browser::foundation::time::Countdown;
/// let mut countdown = Countdown::new();
/// countdown.start(0.5);
/// assert!(!countdown.tick(0.3));
/// assert!(countdown.tick(0.3));
/// assert!(!countdown.is_running());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: Option<f32>,
}

impl Countdown {
    /// Create an idle countdown
    pub fn new() -> Self {
        Self { remaining: None }
    }

    /// Arm the countdown, replacing any pending deadline
    pub fn start(&mut self, seconds: f32) {
        self.remaining = Some(seconds.max(0.0));
    }

    /// Disarm the countdown; calling it on an idle countdown does nothing
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Whether a deadline is pending
    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds left before firing, if armed
    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    /// Advance by `dt` seconds; returns `true` exactly once, on the tick the
    /// deadline elapses
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.remaining {
            Some(left) if left - dt <= 0.0 => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - dt);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_fires_once() {
        let mut countdown = Countdown::new();
        countdown.start(1.0);

        assert!(!countdown.tick(0.4));
        assert!(!countdown.tick(0.4));
        assert!(countdown.tick(0.4));
        assert!(!countdown.tick(0.4));
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_zero_delay_fires_on_next_tick() {
        let mut countdown = Countdown::new();
        countdown.start(0.0);
        assert!(countdown.is_running());
        assert!(countdown.tick(0.0));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut countdown = Countdown::new();
        countdown.start(0.2);
        countdown.cancel();
        countdown.cancel();

        assert!(!countdown.is_running());
        assert!(!countdown.tick(1.0));
    }

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.total_time() >= 0.0);
    }

    #[test]
    fn test_timer_advance_is_deterministic() {
        let mut timer = Timer::new();
        timer.advance(0.25);
        timer.advance(0.5);
        assert_eq!(timer.delta_time(), 0.5);
        assert_eq!(timer.total_time(), 0.75);
        assert_eq!(timer.frame_count(), 2);
    }
}
