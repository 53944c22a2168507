//! Scripted autonomous state machine
//!
//! One `tick()` per external control-loop iteration: read feedback, do one
//! phase's work, maybe transition, emit telemetry. The sequencer never
//! blocks or sleeps; waiting is expressed by returning from the tick and
//! re-checking completion on the next one.

use super::phase::MotionPhase;
use super::timer::OneShotTimer;
use crate::config::{AppConfig, ScriptConfig, ServoPoses};
use crate::devices::HardwareMap;
use crate::error::Result;
use crate::geometry::{RobotGeometry, WheelRole};
use crate::hardware::{Clock, DcMotor, Direction, RunMode, ServoActuator};
use crate::telemetry::TelemetrySink;

/// Per-phase completion latches for the two drive motors
///
/// A side latches once its measured position enters the tolerance band;
/// both latches clear on every phase transition.
#[derive(Debug, Default)]
struct PhaseCompletion {
    left_done: bool,
    right_done: bool,
}

impl PhaseCompletion {
    fn both(&self) -> bool {
        self.left_done && self.right_done
    }

    fn clear(&mut self) {
        self.left_done = false;
        self.right_done = false;
    }
}

/// Polling state machine driving the fixed autonomous script
pub struct AutonomousSequencer {
    geometry: RobotGeometry,
    script: ScriptConfig,
    poses: ServoPoses,
    left_motor: Box<dyn DcMotor>,
    right_motor: Box<dyn DcMotor>,
    arm_motor: Box<dyn DcMotor>,
    left_gripper: Box<dyn ServoActuator>,
    right_gripper: Box<dyn ServoActuator>,
    left_sweeper: Box<dyn ServoActuator>,
    right_sweeper: Box<dyn ServoActuator>,
    clock: Box<dyn Clock>,
    phase: MotionPhase,
    completion: PhaseCompletion,
    timer: OneShotTimer,
}

impl AutonomousSequencer {
    /// Acquire all hardware handles by their wiring names
    ///
    /// A missing device is a fatal configuration error and propagates to
    /// the caller.
    pub fn new(config: &AppConfig, map: &mut HardwareMap, clock: Box<dyn Clock>) -> Result<Self> {
        let hw = &config.hardware;
        Ok(Self {
            geometry: config.robot.clone(),
            script: config.script.clone(),
            poses: config.servos.clone(),
            left_motor: map.take_motor(&hw.left_drive)?,
            right_motor: map.take_motor(&hw.right_drive)?,
            arm_motor: map.take_motor(&hw.arm)?,
            left_gripper: map.take_servo(&hw.left_gripper)?,
            right_gripper: map.take_servo(&hw.right_gripper)?,
            left_sweeper: map.take_servo(&hw.left_sweeper)?,
            right_sweeper: map.take_servo(&hw.right_sweeper)?,
            clock,
            phase: MotionPhase::Startup,
            completion: PhaseCompletion::default(),
            timer: OneShotTimer::new(),
        })
    }

    /// Put the robot into its starting pose
    ///
    /// Right drive motor runs mirrored, encoders start at zero, grippers
    /// open, sweepers tucked in.
    pub fn init(&mut self) {
        self.right_motor.set_direction(Direction::Reverse);
        self.left_motor.set_mode(RunMode::ResetEncoders);
        self.right_motor.set_mode(RunMode::ResetEncoders);

        self.left_gripper.set_position(self.poses.left_gripper_open);
        self.right_gripper.set_position(self.poses.right_gripper_open);
        self.left_sweeper.set_position(self.poses.left_sweeper_closed);
        self.right_sweeper.set_position(self.poses.right_sweeper_closed);

        self.phase = MotionPhase::Startup;
        self.completion.clear();
        log::info!("Sequencer initialized, phase={}", self.phase.name());
    }

    /// Run one control-loop tick
    pub fn tick(&mut self, telemetry: &mut dyn TelemetrySink) {
        match self.phase {
            MotionPhase::Startup => self.tick_startup(),
            MotionPhase::Turn1 => self.tick_turn1(),
            MotionPhase::Forward1 => self.tick_forward1(),
            MotionPhase::Turn2 => self.tick_turn2(),
            MotionPhase::Back2 => self.tick_back2(),
            MotionPhase::Lift => self.tick_lift(),
            MotionPhase::Drop => self.tick_drop(),
            MotionPhase::Done => {}
        }
        self.emit_telemetry(telemetry);
    }

    /// Lifecycle hook for the external scheduler; cleanup placeholder
    pub fn stop(&mut self) {}

    /// Currently active phase
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// True once the script has run to completion
    pub fn is_done(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Completion latches (left, right) for the active phase
    pub fn completion(&self) -> (bool, bool) {
        (self.completion.left_done, self.completion.right_done)
    }

    fn tick_startup(&mut self) {
        self.left_motor.set_mode(RunMode::ResetEncoders);
        self.right_motor.set_mode(RunMode::ResetEncoders);
        self.advance(MotionPhase::Turn1);
    }

    fn tick_turn1(&mut self) {
        let left = self
            .geometry
            .turn_degrees_ticks(self.script.turn1_degrees, WheelRole::Inner);
        let right = self
            .geometry
            .turn_degrees_ticks(self.script.turn1_degrees, WheelRole::Outer);

        let done = self.run_drive_axes(
            left,
            right,
            self.script.inner_turn_power,
            self.script.drive_power,
        );
        if done {
            self.advance(MotionPhase::Forward1);
        }
    }

    fn tick_forward1(&mut self) {
        let ticks = self
            .geometry
            .drive_inches_ticks(self.script.forward_distance_in);

        let done = self.run_drive_axes(ticks, ticks, self.script.drive_power, self.script.drive_power);
        if done {
            self.advance(MotionPhase::Turn2);
        }
    }

    fn tick_turn2(&mut self) {
        let left = self
            .geometry
            .turn_degrees_ticks(self.script.turn2_degrees, WheelRole::Inner);
        let right = self
            .geometry
            .turn_degrees_ticks(self.script.turn2_degrees, WheelRole::Outer);

        // Left wheel leads this pivot, so the asymmetric powers swap sides
        // and run reversed
        let done = self.run_drive_axes(
            left,
            right,
            -self.script.drive_power,
            -self.script.inner_turn_power,
        );
        if done {
            self.advance(MotionPhase::Back2);
        }
    }

    fn tick_back2(&mut self) {
        let ticks = self
            .geometry
            .drive_inches_ticks(self.script.reverse_distance_in);

        let done = self.run_drive_axes(
            ticks,
            ticks,
            -self.script.drive_power,
            -self.script.drive_power,
        );
        if done {
            self.advance(MotionPhase::Lift);
        }
    }

    fn tick_lift(&mut self) {
        self.arm_motor.set_power(self.script.arm_power);

        let now = self.clock.now();
        if self.timer.target_reached(now, self.script.lift_duration_s) {
            self.arm_motor.set_power(0.0);
            self.advance(MotionPhase::Drop);
        }
    }

    fn tick_drop(&mut self) {
        self.left_gripper
            .set_position(self.poses.left_gripper_closed);
        self.right_gripper
            .set_position(self.poses.right_gripper_closed);

        let now = self.clock.now();
        if self.timer.target_reached(now, self.script.drop_hold_s) {
            self.advance(MotionPhase::Done);
        }
    }

    /// Command both drive motors toward the tick targets and latch per-side
    /// completion inside the tolerance band
    ///
    /// Targets are recomputed by the caller every tick; nothing is cached
    /// across ticks except the latches. A side that reaches its band is
    /// stopped and its encoder reset, so the next phase starts from zero.
    /// Returns true once both sides have latched.
    fn run_drive_axes(
        &mut self,
        left_target: f64,
        right_target: f64,
        left_power: f64,
        right_power: f64,
    ) -> bool {
        self.left_motor.set_target_position(left_target as i32);
        self.right_motor.set_target_position(right_target as i32);
        self.left_motor.set_mode(RunMode::RunToPosition);
        self.right_motor.set_mode(RunMode::RunToPosition);
        self.left_motor.set_power(left_power);
        self.right_motor.set_power(right_power);

        let tolerance = self.geometry.encoder_tolerance_ticks;
        if (left_target - self.left_motor.current_position() as f64).abs() < tolerance {
            self.left_motor.set_power(0.0);
            self.left_motor.set_mode(RunMode::ResetEncoders);
            self.completion.left_done = true;
        }
        if (right_target - self.right_motor.current_position() as f64).abs() < tolerance {
            self.right_motor.set_power(0.0);
            self.right_motor.set_mode(RunMode::ResetEncoders);
            self.completion.right_done = true;
        }
        self.completion.both()
    }

    fn advance(&mut self, next: MotionPhase) {
        log::info!("Phase {} -> {}", self.phase.name(), next.name());
        self.phase = next;
        self.completion.clear();
    }

    fn emit_telemetry(&self, telemetry: &mut dyn TelemetrySink) {
        telemetry.add_data("phase", self.phase.name().to_string());

        telemetry.add_data("left_target", self.left_motor.target_position().to_string());
        telemetry.add_data(
            "left_position",
            self.left_motor.current_position().to_string(),
        );
        telemetry.add_data("left_power", format!("{:.2}", self.left_motor.power()));

        telemetry.add_data(
            "right_target",
            self.right_motor.target_position().to_string(),
        );
        telemetry.add_data(
            "right_position",
            self.right_motor.current_position().to_string(),
        );
        telemetry.add_data("right_power", format!("{:.2}", self.right_motor.power()));

        telemetry.add_data("arm_power", format!("{:.2}", self.arm_motor.power()));

        telemetry.add_data(
            "left_gripper",
            format!("{:.2}", self.left_gripper.position()),
        );
        telemetry.add_data(
            "right_gripper",
            format!("{:.2}", self.right_gripper.position()),
        );
        telemetry.add_data(
            "left_sweeper",
            format!("{:.2}", self.left_sweeper.position()),
        );
        telemetry.add_data(
            "right_sweeper",
            format!("{:.2}", self.right_sweeper.position()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mock::{mock_pushbot, ManualClock, MockRig};
    use crate::telemetry::BufferTelemetry;

    const SIM_TICKS: i32 = 500;
    const SIM_DT: f64 = 0.02;

    fn test_sequencer(config: &AppConfig) -> (AutonomousSequencer, MockRig, ManualClock) {
        let (mut map, rig) = mock_pushbot();
        let clock = ManualClock::new();
        let mut seq = AutonomousSequencer::new(config, &mut map, Box::new(clock.clone())).unwrap();
        seq.init();
        (seq, rig, clock)
    }

    fn run_until_phase(
        seq: &mut AutonomousSequencer,
        rig: &MockRig,
        clock: &ManualClock,
        phase: MotionPhase,
        max_ticks: usize,
    ) {
        let mut telemetry = BufferTelemetry::new();
        for _ in 0..max_ticks {
            if seq.phase() == phase {
                return;
            }
            seq.tick(&mut telemetry);
            rig.step_drive(SIM_TICKS);
            clock.advance(SIM_DT);
        }
        panic!("never reached phase {:?}", phase);
    }

    #[test]
    fn test_missing_device_fails_construction() {
        let mut config = AppConfig::pushbot_defaults();
        config.hardware.arm = "missing_arm".to_string();
        let (mut map, _rig) = mock_pushbot();
        let clock = ManualClock::new();

        let result = AutonomousSequencer::new(&config, &mut map, Box::new(clock));
        assert!(result.is_err());
    }

    #[test]
    fn test_init_sets_rest_pose() {
        let config = AppConfig::pushbot_defaults();
        let (_seq, rig, _clock) = test_sequencer(&config);

        assert_eq!(rig.right_drive.direction(), Direction::Reverse);
        assert_eq!(rig.left_drive.current_position(), 0);
        assert_eq!(rig.left_gripper.position(), config.servos.left_gripper_open);
        assert_eq!(
            rig.right_gripper.position(),
            config.servos.right_gripper_open
        );
        assert_eq!(
            rig.left_sweeper.position(),
            config.servos.left_sweeper_closed
        );
    }

    #[test]
    fn test_startup_transitions_immediately() {
        let config = AppConfig::pushbot_defaults();
        let (mut seq, _rig, _clock) = test_sequencer(&config);
        let mut telemetry = BufferTelemetry::new();

        assert_eq!(seq.phase(), MotionPhase::Startup);
        seq.tick(&mut telemetry);
        assert_eq!(seq.phase(), MotionPhase::Turn1);
        assert_eq!(seq.completion(), (false, false));
    }

    #[test]
    fn test_turn1_latches_sides_independently() {
        let config = AppConfig::pushbot_defaults();
        let (mut seq, rig, _clock) = test_sequencer(&config);
        let mut telemetry = BufferTelemetry::new();

        seq.tick(&mut telemetry); // startup -> turn1

        // First turn tick commands asymmetric powers toward the 45° targets
        seq.tick(&mut telemetry);
        assert_eq!(seq.completion(), (false, false));
        assert_eq!(rig.left_drive.power(), config.script.inner_turn_power);
        assert_eq!(rig.right_drive.power(), config.script.drive_power);

        // Step only the inner wheel to its target: left latches, phase holds
        for _ in 0..30 {
            rig.left_drive.step(SIM_TICKS);
            seq.tick(&mut telemetry);
            if seq.completion().0 {
                break;
            }
        }
        assert!(seq.completion().0);
        assert_eq!(seq.phase(), MotionPhase::Turn1);

        // Now let the outer wheel finish: both latch, flags clear on exit
        for _ in 0..30 {
            rig.right_drive.step(SIM_TICKS);
            seq.tick(&mut telemetry);
            if seq.phase() != MotionPhase::Turn1 {
                break;
            }
        }
        assert_eq!(seq.phase(), MotionPhase::Forward1);
        assert_eq!(seq.completion(), (false, false));
    }

    #[test]
    fn test_phases_advance_strictly_forward() {
        let mut config = AppConfig::pushbot_defaults();
        config.script.lift_duration_s = 0.5;
        config.script.drop_hold_s = 0.2;
        let (mut seq, rig, clock) = test_sequencer(&config);

        let mut telemetry = BufferTelemetry::new();
        let mut phases = vec![seq.phase()];
        for _ in 0..5_000 {
            if seq.is_done() {
                break;
            }
            seq.tick(&mut telemetry);
            rig.step_drive(SIM_TICKS);
            clock.advance(SIM_DT);
            if *phases.last().unwrap() != seq.phase() {
                phases.push(seq.phase());
            }
        }

        assert_eq!(
            phases,
            vec![
                MotionPhase::Startup,
                MotionPhase::Turn1,
                MotionPhase::Forward1,
                MotionPhase::Turn2,
                MotionPhase::Back2,
                MotionPhase::Lift,
                MotionPhase::Drop,
                MotionPhase::Done,
            ]
        );
    }

    #[test]
    fn test_done_absorbs_further_ticks() {
        let mut config = AppConfig::pushbot_defaults();
        config.script.lift_duration_s = 0.1;
        config.script.drop_hold_s = 0.1;
        let (mut seq, rig, clock) = test_sequencer(&config);
        run_until_phase(&mut seq, &rig, &clock, MotionPhase::Done, 5_000);

        let mut telemetry = BufferTelemetry::new();
        for _ in 0..50 {
            seq.tick(&mut telemetry);
            clock.advance(SIM_DT);
        }
        assert_eq!(seq.phase(), MotionPhase::Done);
    }

    #[test]
    fn test_lift_powers_arm_then_stops_it() {
        let mut config = AppConfig::pushbot_defaults();
        config.script.lift_duration_s = 0.5;
        let (mut seq, rig, clock) = test_sequencer(&config);
        run_until_phase(&mut seq, &rig, &clock, MotionPhase::Lift, 5_000);

        let mut telemetry = BufferTelemetry::new();
        seq.tick(&mut telemetry);
        assert_eq!(rig.left_arm.power(), config.script.arm_power);

        run_until_phase(&mut seq, &rig, &clock, MotionPhase::Drop, 5_000);
        assert_eq!(rig.left_arm.power(), 0.0);
    }

    #[test]
    fn test_drop_holds_until_clock_advances() {
        let mut config = AppConfig::pushbot_defaults();
        config.script.lift_duration_s = 0.1;
        let (mut seq, rig, clock) = test_sequencer(&config);
        run_until_phase(&mut seq, &rig, &clock, MotionPhase::Drop, 5_000);

        // Frozen clock: grippers close but the phase never completes
        let mut telemetry = BufferTelemetry::new();
        for _ in 0..100 {
            seq.tick(&mut telemetry);
        }
        assert_eq!(seq.phase(), MotionPhase::Drop);
        assert_eq!(
            rig.left_gripper.position(),
            config.servos.left_gripper_closed
        );
        assert_eq!(
            rig.right_gripper.position(),
            config.servos.right_gripper_closed
        );

        // One tick past the hold duration finishes the script
        clock.advance(config.script.drop_hold_s + 0.01);
        seq.tick(&mut telemetry);
        assert_eq!(seq.phase(), MotionPhase::Done);
    }

    #[test]
    fn test_telemetry_reports_phase_and_axes() {
        let config = AppConfig::pushbot_defaults();
        let (mut seq, _rig, _clock) = test_sequencer(&config);
        let mut telemetry = BufferTelemetry::new();

        seq.tick(&mut telemetry); // startup
        seq.tick(&mut telemetry); // turn1

        assert_eq!(telemetry.values("phase"), vec!["turn1", "turn1"]);
        // 45° outer target with stock geometry: 17.5π / 4π × 2880 / 8 = 1575
        assert_eq!(telemetry.last_value("right_target"), Some("1575"));
        assert_eq!(telemetry.last_value("left_target"), Some("180"));
        assert!(telemetry.last_value("left_sweeper").is_some());
    }
}
