use serde::{Deserialize, Serialize};

/// A segment of the breathing cycle, plus the two bookend states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    Inhale,
    HoldAfterInhale,
    Exhale,
    HoldAfterExhale,
    Completed,
}

impl Phase {
    /// Fixed order of the four breathing phases within one cycle.
    pub const CYCLE: [Phase; 4] = [
        Phase::Inhale,
        Phase::HoldAfterInhale,
        Phase::Exhale,
        Phase::HoldAfterExhale,
    ];

    /// True for the four phases that have a duration and progress.
    pub fn is_breathing(self) -> bool {
        !matches!(self, Phase::NotStarted | Phase::Completed)
    }

    /// Position within [`Phase::CYCLE`], if this is a breathing phase.
    pub(crate) fn cycle_index(self) -> Option<usize> {
        Phase::CYCLE.iter().position(|p| *p == self)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::NotStarted => "not_started",
            Phase::Inhale => "inhale",
            Phase::HoldAfterInhale => "hold_after_inhale",
            Phase::Exhale => "exhale",
            Phase::HoldAfterExhale => "hold_after_exhale",
            Phase::Completed => "completed",
        };
        f.write_str(s)
    }
}
