//! Drive-train geometry and encoder tick calculators
//!
//! The calculators are pure: every target is recomputed from geometry on
//! demand rather than cached, so the state machine carries no derived
//! position data between ticks.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Which arc a wheel describes during a pivot turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelRole {
    /// Wheel on the smaller arc
    Inner,
    /// Wheel on the larger arc
    Outer,
}

impl WheelRole {
    /// Parse a case-insensitive wiring/config string
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("inner") {
            Some(Self::Inner)
        } else if s.eq_ignore_ascii_case("outer") {
            Some(Self::Outer)
        } else {
            None
        }
    }
}

/// Drive-train geometry, fixed at construction
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RobotGeometry {
    /// Encoder ticks per motor shaft rotation
    pub encoder_ticks_per_rotation: i32,

    /// Axle gear teeth divided by motor gear teeth
    pub gear_ratio: f64,

    /// Full diameter of the wheel tread in inches
    pub wheel_diameter_in: f64,

    /// Distance between the left and right tires in inches
    pub axle_width_in: f64,

    /// Buffer added to the inside turn radius so the inner wheel keeps moving
    pub axle_width_buffer_in: f64,

    /// Completion band around a target, in ticks (prevents freezing on the
    /// exact tick comparison)
    pub encoder_tolerance_ticks: f64,
}

impl RobotGeometry {
    /// Wheel tread circumference in inches
    pub fn wheel_circumference(&self) -> f64 {
        PI * self.wheel_diameter_in
    }

    /// Encoder ticks needed to roll `distance_in` inches in a straight line
    pub fn drive_inches_ticks(&self, distance_in: f64) -> f64 {
        let wheel_rotations = distance_in / self.wheel_circumference();
        wheel_rotations * self.encoder_ticks_per_rotation as f64 * self.gear_ratio
    }

    /// Encoder ticks for one wheel of a pivot turn of `degrees`
    ///
    /// The inner wheel turns on a circle of diameter `2 × buffer`, the outer
    /// wheel on `axle_width + 2 × buffer`. The result is the fraction of the
    /// full-circle tick count that `degrees` covers.
    pub fn turn_degrees_ticks(&self, degrees: f64, role: WheelRole) -> f64 {
        let turn_diameter = match role {
            WheelRole::Inner => 2.0 * self.axle_width_buffer_in,
            WheelRole::Outer => self.axle_width_in + 2.0 * self.axle_width_buffer_in,
        };
        let turn_circumference = turn_diameter * PI;
        let wheel_rotations = turn_circumference / self.wheel_circumference();
        let full_circle_ticks =
            wheel_rotations * self.encoder_ticks_per_rotation as f64 * self.gear_ratio;
        (degrees / 360.0) * full_circle_ticks
    }

    /// String-keyed variant of [`turn_degrees_ticks`](Self::turn_degrees_ticks)
    ///
    /// An unrecognized role yields a zero-tick turn rather than an error.
    /// The degradation is logged so a wiring typo shows up in the run log.
    pub fn turn_degrees_ticks_for(&self, degrees: f64, role: &str) -> f64 {
        match WheelRole::parse(role) {
            Some(r) => self.turn_degrees_ticks(degrees, r),
            None => {
                log::warn!("Unknown wheel role {:?}, commanding a zero-tick turn", role);
                0.0
            }
        }
    }

    /// Geometry of the stock PushBot drive train
    pub fn pushbot_defaults() -> Self {
        Self {
            encoder_ticks_per_rotation: 1440,
            gear_ratio: 2.0,
            wheel_diameter_in: 4.0,
            axle_width_in: 15.5,
            axle_width_buffer_in: 1.0,
            encoder_tolerance_ticks: 4.0,
        }
    }
}

impl Default for RobotGeometry {
    fn default() -> Self {
        Self::pushbot_defaults()
    }
}
