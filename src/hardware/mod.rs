//! Hardware handle contracts
//!
//! The sequencer consumes hardware through these traits; the wiring map
//! hands out boxed handles and the real drivers live behind them. All
//! commands are fire-and-forget: the motor controller is assumed to accept
//! every command, so fallibility lives only in device lookup at init time.

pub mod clock;
pub mod motor;
pub mod servo;

pub use clock::{Clock, SystemClock};
pub use motor::{DcMotor, Direction, RunMode};
pub use servo::ServoActuator;
