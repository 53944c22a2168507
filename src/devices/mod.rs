//! Device registry and simulated devices

pub mod mock;

use crate::error::{Error, Result};
use crate::hardware::{DcMotor, ServoActuator};
use std::collections::HashMap;

/// Named hardware handles, filled by a rig builder and drained during init
///
/// Handles are removed on lookup so the sequencer ends up owning its
/// devices exclusively; asking for the same name twice, or for a name that
/// was never wired, is a fatal configuration error.
pub struct HardwareMap {
    motors: HashMap<String, Box<dyn DcMotor>>,
    servos: HashMap<String, Box<dyn ServoActuator>>,
}

impl HardwareMap {
    /// Create an empty wiring map
    pub fn new() -> Self {
        Self {
            motors: HashMap::new(),
            servos: HashMap::new(),
        }
    }

    /// Register a motor under a wiring name
    pub fn insert_motor(&mut self, name: &str, motor: Box<dyn DcMotor>) {
        self.motors.insert(name.to_string(), motor);
    }

    /// Register a servo under a wiring name
    pub fn insert_servo(&mut self, name: &str, servo: Box<dyn ServoActuator>) {
        self.servos.insert(name.to_string(), servo);
    }

    /// Remove and return the named motor handle
    pub fn take_motor(&mut self, name: &str) -> Result<Box<dyn DcMotor>> {
        self.motors
            .remove(name)
            .ok_or_else(|| Error::DeviceNotFound(name.to_string()))
    }

    /// Remove and return the named servo handle
    pub fn take_servo(&mut self, name: &str) -> Result<Box<dyn ServoActuator>> {
        self.servos
            .remove(name)
            .ok_or_else(|| Error::DeviceNotFound(name.to_string()))
    }
}

impl Default for HardwareMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mock::MockMotor;

    #[test]
    fn test_take_motor_removes_handle() {
        let mut map = HardwareMap::new();
        map.insert_motor("left_drive", Box::new(MockMotor::new()));

        assert!(map.take_motor("left_drive").is_ok());
        assert!(matches!(
            map.take_motor("left_drive"),
            Err(Error::DeviceNotFound(_))
        ));
    }

    #[test]
    fn test_missing_device_is_fatal() {
        let mut map = HardwareMap::new();
        let err = map.take_servo("left_hand").unwrap_err();
        assert!(err.to_string().contains("left_hand"));
    }
}
