//! DC motor handle contract

/// Rotation direction of the motor output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    /// Mounted mirrored; commands and feedback are sign-flipped by the
    /// controller so both sides of the robot share one convention
    Reverse,
}

/// Motor controller run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Zero the encoder counters
    ResetEncoders,
    /// Drive toward the commanded target position, with the commanded
    /// power magnitude as a ceiling
    RunToPosition,
}

/// DC motor handle
pub trait DcMotor: Send {
    /// Set the rotation direction
    fn set_direction(&mut self, direction: Direction);

    /// Set the controller run mode
    fn set_mode(&mut self, mode: RunMode);

    /// Set the target encoder position in ticks
    fn set_target_position(&mut self, ticks: i32);

    /// Set motor power in [-1.0, 1.0]
    fn set_power(&mut self, power: f64);

    /// Current encoder position in ticks
    fn current_position(&self) -> i32;

    /// Last commanded target position in ticks
    fn target_position(&self) -> i32;

    /// Last commanded power
    fn power(&self) -> f64;
}
