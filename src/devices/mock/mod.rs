//! Mock devices for hardware-free simulation
//!
//! The mock rig stands in for the robot controller: motors simulate
//! run-to-position moves when stepped, servos latch their commanded
//! position, and the manual clock advances only when told to. Handles are
//! shared-state clones, so the sequencer owns one side of a device while a
//! test or the simulation loop drives the other side.

pub mod clock;
pub mod motor;
pub mod servo;

pub use clock::ManualClock;
pub use motor::MockMotor;
pub use servo::MockServo;

use super::HardwareMap;

/// Simulation-side handles for a full PushBot rig
pub struct MockRig {
    pub left_drive: MockMotor,
    pub right_drive: MockMotor,
    pub left_arm: MockMotor,
    pub left_gripper: MockServo,
    pub right_gripper: MockServo,
    pub left_sweeper: MockServo,
    pub right_sweeper: MockServo,
}

impl MockRig {
    /// Advance every simulated motor by one control tick
    ///
    /// `max_ticks` is the encoder travel of a drive motor over one tick at
    /// full power; each motor moves proportionally to its commanded power.
    pub fn step_drive(&self, max_ticks: i32) {
        self.left_drive.step(max_ticks);
        self.right_drive.step(max_ticks);
        self.left_arm.step(max_ticks);
    }
}

/// Build a wiring map with the stock PushBot device names
///
/// Returns the map the sequencer drains during init plus the
/// simulation-side clones.
pub fn mock_pushbot() -> (HardwareMap, MockRig) {
    let rig = MockRig {
        left_drive: MockMotor::new(),
        right_drive: MockMotor::new(),
        left_arm: MockMotor::new(),
        left_gripper: MockServo::new(),
        right_gripper: MockServo::new(),
        left_sweeper: MockServo::new(),
        right_sweeper: MockServo::new(),
    };

    let mut map = HardwareMap::new();
    map.insert_motor("left_drive", Box::new(rig.left_drive.clone()));
    map.insert_motor("right_drive", Box::new(rig.right_drive.clone()));
    map.insert_motor("left_arm", Box::new(rig.left_arm.clone()));
    map.insert_servo("left_hand", Box::new(rig.left_gripper.clone()));
    map.insert_servo("right_hand", Box::new(rig.right_gripper.clone()));
    map.insert_servo("left_sweeper", Box::new(rig.left_sweeper.clone()));
    map.insert_servo("right_sweeper", Box::new(rig.right_sweeper.clone()));

    (map, rig)
}
