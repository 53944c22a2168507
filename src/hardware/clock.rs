//! Monotonic elapsed-time source

use std::time::Instant;

/// Monotonic clock reporting seconds since some fixed origin
pub trait Clock: Send {
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`], origin at construction
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
