// Copyright (c) 2026 rezky_nightky

use std::thread;
use std::time::{Duration, Instant};

/// Fixed-interval frame pacing. A frame that finishes early sleeps off the
/// rest of the interval; a slow frame simply delays the next one.
#[derive(Clone, Debug)]
pub struct FrameClock {
    interval: Duration,
    last_tick: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Time left before the next tick is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_tick))
    }

    /// Records a tick at `now` without sleeping.
    pub fn mark(&mut self, now: Instant) {
        self.last_tick = now;
        self.frames = self.frames.saturating_add(1);
    }

    /// Sleeps until the next tick is due and returns its timestamp.
    pub fn pace(&mut self) -> Instant {
        let wait = self.remaining(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        let now = Instant::now();
        self.mark(now);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(15);

    #[test]
    fn remaining_counts_down_to_zero() {
        let t0 = Instant::now();
        let clock = FrameClock::new(TICK, t0);
        assert_eq!(clock.remaining(t0), TICK);
        assert_eq!(clock.remaining(t0 + Duration::from_millis(10)), Duration::from_millis(5));
        assert_eq!(clock.remaining(t0 + Duration::from_millis(40)), Duration::ZERO);
    }

    #[test]
    fn slow_frames_are_not_compensated() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(TICK, t0);
        clock.mark(t0 + Duration::from_millis(50));
        assert_eq!(clock.remaining(t0 + Duration::from_millis(50)), TICK);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn pace_waits_out_the_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::new(TICK, start);
        let tick = clock.pace();
        assert!(tick.duration_since(start) >= TICK);
        assert_eq!(clock.frames(), 1);
    }
}
