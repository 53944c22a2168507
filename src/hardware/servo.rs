//! Servo handle contract

/// Positional servo handle
pub trait ServoActuator: Send + std::fmt::Debug {
    /// Command the servo to a position in [0.0, 1.0]
    fn set_position(&mut self, position: f64);

    /// Last commanded position
    fn position(&self) -> f64;
}
