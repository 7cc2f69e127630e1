use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Phase;

/// Why a session stopped on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// `cycle_count` reached `total_cycles`.
    CycleLimit,
    /// Elapsed session time reached the configured session length.
    TimeLimit,
}

/// Every state change in the engine produces an Event.
/// The presentation layer reacts to them (prompts, sounds, haptics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        pattern_id: String,
        phase: Phase,
        at: DateTime<Utc>,
    },
    SessionPaused {
        phase: Phase,
        progress: f64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        phase: Phase,
        progress: f64,
        at: DateTime<Utc>,
    },
    PhaseAdvanced {
        from: Phase,
        to: Phase,
        /// True when this transition wrapped back to Inhale.
        cycle_completed: bool,
        cycle_count: u32,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        reason: CompletionReason,
        cycle_count: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    PatternChanged {
        pattern_id: String,
        phase: Phase,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::SessionStarted { at, .. }
            | Event::SessionPaused { at, .. }
            | Event::SessionResumed { at, .. }
            | Event::PhaseAdvanced { at, .. }
            | Event::SessionCompleted { at, .. }
            | Event::SessionReset { at }
            | Event::PatternChanged { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let ev = Event::SessionCompleted {
            reason: CompletionReason::CycleLimit,
            cycle_count: 3,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "SessionCompleted");
        assert_eq!(json["reason"], "cycle_limit");
        assert_eq!(json["cycle_count"], 3);
    }
}
