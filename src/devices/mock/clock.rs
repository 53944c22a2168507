//! Manually advanced clock for deterministic simulation

use crate::hardware::Clock;
use std::sync::{Arc, Mutex};

/// Clock that only moves when advanced
///
/// Clones share the same time base, so the side driving the simulation and
/// the side reading `now()` stay in lockstep.
#[derive(Clone)]
pub struct ManualClock {
    seconds: Arc<Mutex<f64>>,
}

impl ManualClock {
    /// Create a clock at t = 0
    pub fn new() -> Self {
        Self {
            seconds: Arc::new(Mutex::new(0.0)),
        }
    }

    /// Move time forward by `dt` seconds
    pub fn advance(&self, dt: f64) {
        *self.seconds.lock().unwrap() += dt;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        *self.seconds.lock().unwrap()
    }
}
