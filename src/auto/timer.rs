//! One-shot timer shared by time-gated actions

/// Single-slot one-shot timer
///
/// Only one timed action may be pending at a time: the slot latches on the
/// first poll and frees itself on the poll that reports the target reached.
/// Starting a second action while one is pending would read the first
/// action's start time, so callers must run timed actions strictly one
/// after another.
#[derive(Debug, Default)]
pub struct OneShotTimer {
    started: bool,
    start: f64,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll the timer
    ///
    /// The first poll latches `now` as the start of the action and reports
    /// not reached. Later polls report reached once
    /// `now - start >= target_s`, and un-latch so the next timed action
    /// starts fresh.
    pub fn target_reached(&mut self, now: f64, target_s: f64) -> bool {
        if !self.started {
            self.started = true;
            self.start = now;
            return false;
        }
        let reached = now - self.start >= target_s;
        if reached {
            self.started = false;
        }
        reached
    }
}
