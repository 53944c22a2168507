//! Phases of the scripted run

/// Phases of the autonomous script, in execution order
///
/// The machine only ever moves forward through this list; `Done` is
/// terminal and absorbs all further ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    /// Zero the drive encoders before the first move
    Startup,
    /// First pivot away from the starting wall
    Turn1,
    /// Long straight leg across the field
    Forward1,
    /// Second pivot, driven in reverse
    Turn2,
    /// Reverse leg back toward the scoring zone
    Back2,
    /// Raise the arm for a fixed minimum duration
    Lift,
    /// Close the grippers and hold before finishing
    Drop,
    /// Script complete
    Done,
}

impl MotionPhase {
    /// Phase name for telemetry and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Turn1 => "turn1",
            Self::Forward1 => "forward1",
            Self::Turn2 => "turn2",
            Self::Back2 => "back2",
            Self::Lift => "lift",
            Self::Drop => "drop",
            Self::Done => "done",
        }
    }

    /// True once the script has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}
