//! Mock positional servo

use crate::hardware::ServoActuator;
use std::sync::{Arc, Mutex};

/// Mock servo that latches its commanded position
#[derive(Clone, Debug)]
pub struct MockServo {
    position: Arc<Mutex<f64>>,
}

impl MockServo {
    pub fn new() -> Self {
        Self {
            position: Arc::new(Mutex::new(0.0)),
        }
    }
}

impl Default for MockServo {
    fn default() -> Self {
        Self::new()
    }
}

impl ServoActuator for MockServo {
    fn set_position(&mut self, position: f64) {
        *self.position.lock().unwrap() = position.clamp(0.0, 1.0);
    }

    fn position(&self) -> f64 {
        *self.position.lock().unwrap()
    }
}
