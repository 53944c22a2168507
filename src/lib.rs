//! PushBot autonomous sequencer
//!
//! A polling state machine that drives a fixed one-shot autonomous script
//! for a differential-drive competition robot: pivot, long straight leg,
//! second pivot, reverse leg, arm lift, gripper release. An external
//! scheduler calls `tick()` at a fixed cadence; each tick does at most one
//! phase's work and polls encoder feedback for completion.
//!
//! Hardware is consumed through the traits in [`hardware`]; the [`devices`]
//! module provides the wiring map plus a mock rig for hardware-free
//! simulation and testing.

pub mod auto;
pub mod config;
pub mod devices;
pub mod error;
pub mod geometry;
pub mod hardware;
pub mod telemetry;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Error, Result};
