//! Configuration for the autonomous runner
//!
//! Loads configuration from a TOML file: wiring names, drive-train
//! geometry, the scripted run parameters, servo poses, control loop
//! settings and logging.

use crate::error::{Error, Result};
use crate::geometry::RobotGeometry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub hardware: HardwareConfig,
    pub robot: RobotGeometry,
    pub script: ScriptConfig,
    pub servos: ServoPoses,
    pub control: ControlConfig,
    pub logging: LoggingConfig,
}

/// Wiring-map names for the hardware handles
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HardwareConfig {
    pub left_drive: String,
    pub right_drive: String,
    pub arm: String,
    pub left_gripper: String,
    pub right_gripper: String,
    pub left_sweeper: String,
    pub right_sweeper: String,
}

/// Parameters of the scripted autonomous run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScriptConfig {
    /// First pivot, degrees
    pub turn1_degrees: f64,

    /// Straight leg after the first pivot, inches
    pub forward_distance_in: f64,

    /// Second pivot, degrees
    pub turn2_degrees: f64,

    /// Reverse leg back toward the wall, inches
    pub reverse_distance_in: f64,

    /// Power ceiling for the inside wheel during a pivot
    pub inner_turn_power: f64,

    /// Power ceiling for straight legs and the outside wheel
    pub drive_power: f64,

    /// Arm motor power while lifting
    pub arm_power: f64,

    /// Minimum lift duration in seconds
    pub lift_duration_s: f64,

    /// Gripper hold before finishing, in seconds
    pub drop_hold_s: f64,
}

/// Servo rest and action poses
///
/// The two sides are mounted mirrored, so an "open" pose on the left is
/// numerically the opposite end of the range on the right.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServoPoses {
    pub left_gripper_open: f64,
    pub left_gripper_closed: f64,
    pub right_gripper_open: f64,
    pub right_gripper_closed: f64,
    pub left_sweeper_closed: f64,
    pub right_sweeper_closed: f64,
}

/// Control loop settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlConfig {
    /// Tick rate of the external control loop, Hz
    pub loop_hz: f64,

    /// Encoder travel of a drive motor over one tick at full power,
    /// used by the mock rig
    pub sim_max_ticks_per_tick: i32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Default configuration for the stock PushBot
    ///
    /// Suitable for testing and simulation. Real runs should load a proper
    /// TOML configuration file.
    pub fn pushbot_defaults() -> Self {
        Self {
            hardware: HardwareConfig {
                left_drive: "left_drive".to_string(),
                right_drive: "right_drive".to_string(),
                arm: "left_arm".to_string(),
                left_gripper: "left_hand".to_string(),
                right_gripper: "right_hand".to_string(),
                left_sweeper: "left_sweeper".to_string(),
                right_sweeper: "right_sweeper".to_string(),
            },
            robot: RobotGeometry::pushbot_defaults(),
            script: ScriptConfig {
                turn1_degrees: 45.0,
                forward_distance_in: 85.0,
                turn2_degrees: 135.0,
                reverse_distance_in: 85.0,
                inner_turn_power: 0.2,
                drive_power: 1.0,
                arm_power: 0.1,
                lift_duration_s: 10.0,
                drop_hold_s: 1.0,
            },
            servos: ServoPoses {
                left_gripper_open: 0.0,
                left_gripper_closed: 1.0,
                right_gripper_open: 1.0,
                right_gripper_closed: 0.0,
                left_sweeper_closed: 1.0,
                right_sweeper_closed: 0.0,
            },
            control: ControlConfig {
                loop_hz: 50.0,
                sim_max_ticks_per_tick: 500,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    /// Reject configurations the sequencer cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.control.loop_hz <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "loop_hz must be positive, got {}",
                self.control.loop_hz
            )));
        }
        for (name, power) in [
            ("inner_turn_power", self.script.inner_turn_power),
            ("drive_power", self.script.drive_power),
            ("arm_power", self.script.arm_power),
        ] {
            if !(-1.0..=1.0).contains(&power) {
                return Err(Error::InvalidParameter(format!(
                    "{} must be within [-1.0, 1.0], got {}",
                    name, power
                )));
            }
        }
        if self.script.lift_duration_s < 0.0 || self.script.drop_hold_s < 0.0 {
            return Err(Error::InvalidParameter(
                "timed actions cannot have negative durations".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::pushbot_defaults()
    }
}
