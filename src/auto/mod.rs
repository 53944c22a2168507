//! Autonomous sequence state machine

pub mod phase;
pub mod sequencer;
pub mod timer;

pub use phase::MotionPhase;
pub use sequencer::AutonomousSequencer;
pub use timer::OneShotTimer;
