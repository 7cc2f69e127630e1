//! Phase clock implementation.
//!
//! The phase clock is a delta-driven state machine. It owns no timers -- the
//! caller invokes `tick()` once per animation frame with the seconds elapsed
//! since the previous frame. Not calling `tick()` freezes the state.
//!
//! ## State Transitions
//!
//! ```text
//! NotStarted -> Inhale -> HoldAfterInhale -> Exhale -> HoldAfterExhale -> Inhale ...
//!                  \______________ (cycle limit reached) ______________-> Completed
//! ```
//!
//! Phases with a zero duration are skipped. Any state returns to `NotStarted`
//! on `reset()`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut clock = PhaseClock::new(catalog.get("box").clone());
//! clock.start();
//! // Once per frame:
//! if let Some(event) = clock.tick(delta_secs) { /* phase changed */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::phase::Phase;
use crate::events::{CompletionReason, Event};
use crate::pattern::BreathingPattern;

/// Progress within this distance of 1.0 counts as a finished phase, so that
/// accumulated float error cannot leave a phase stuck at 0.9999999.
pub const PROGRESS_EPSILON: f64 = 1e-6;

/// Clamp a frame delta to a usable value: NaN, infinities and negatives become 0.
pub fn sanitize_delta(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 {
        secs
    } else {
        0.0
    }
}

/// Breathing phase state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseClock {
    pattern: BreathingPattern,
    phase: Phase,
    /// Fraction of the current phase elapsed, in `[0, 1)`.
    progress: f64,
    is_active: bool,
    cycle_count: u32,
    /// 0 means unlimited.
    total_cycles: u32,
}

impl PhaseClock {
    /// Create a clock in `NotStarted`, inactive, with no cycle limit.
    pub fn new(pattern: BreathingPattern) -> Self {
        Self {
            pattern,
            phase: Phase::NotStarted,
            progress: 0.0,
            is_active: false,
            cycle_count: 0,
            total_cycles: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 0.0 .. 1.0 progress within the current phase. Always 0 outside a breathing phase.
    pub fn progress(&self) -> f64 {
        if self.phase.is_breathing() {
            self.progress
        } else {
            0.0
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Active and in a breathing phase, i.e. `tick()` will make progress.
    pub fn is_running(&self) -> bool {
        self.is_active && self.phase.is_breathing()
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn total_cycles(&self) -> u32 {
        self.total_cycles
    }

    pub fn pattern(&self) -> &BreathingPattern {
        &self.pattern
    }

    /// Configured duration of the current phase; 0 outside a breathing phase.
    pub fn phase_duration_secs(&self) -> f64 {
        self.pattern.duration_of(self.phase)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume advancing.
    ///
    /// From `NotStarted` this enters the first active phase. `Completed` is
    /// terminal until `reset()`, so starting from it does nothing.
    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            Phase::Completed => None,
            _ if self.is_active => None,
            Phase::NotStarted => {
                self.phase = self.first_phase();
                self.progress = 0.0;
                self.is_active = true;
                info!(pattern_id = %self.pattern.id, "breathing session started");
                Some(Event::SessionStarted {
                    pattern_id: self.pattern.id.clone(),
                    phase: self.phase,
                    at: Utc::now(),
                })
            }
            _ => {
                self.is_active = true;
                Some(Event::SessionResumed {
                    phase: self.phase,
                    progress: self.progress,
                    at: Utc::now(),
                })
            }
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_active {
            return None;
        }
        self.is_active = false;
        Some(Event::SessionPaused {
            phase: self.phase,
            progress: self.progress(),
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_active {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Back to `NotStarted` with no cycles counted.
    pub fn reset(&mut self) -> Event {
        self.phase = Phase::NotStarted;
        self.progress = 0.0;
        self.is_active = false;
        self.cycle_count = 0;
        info!("breathing session reset");
        Event::SessionReset { at: Utc::now() }
    }

    /// Swap the duration set.
    ///
    /// A breathing phase restarts at the first active phase with zero
    /// progress. `is_active` and `cycle_count` are left as they are, and the
    /// bookend states stay put.
    pub fn set_pattern(&mut self, pattern: BreathingPattern) -> Event {
        self.pattern = pattern;
        self.progress = 0.0;
        if self.phase.is_breathing() {
            self.phase = self.first_phase();
        }
        debug!(pattern_id = %self.pattern.id, phase = %self.phase, "pattern changed");
        Event::PatternChanged {
            pattern_id: self.pattern.id.clone(),
            phase: self.phase,
            at: Utc::now(),
        }
    }

    /// Set the cycle limit. 0 means unlimited. Checked at the next wraparound.
    pub fn set_total_cycles(&mut self, total_cycles: u32) {
        self.total_cycles = total_cycles;
    }

    /// Force the terminal state for a reason decided outside the clock.
    pub fn finish(&mut self, reason: CompletionReason) -> Option<Event> {
        if self.phase == Phase::Completed {
            return None;
        }
        Some(self.complete(reason))
    }

    /// Advance by `elapsed_secs`. Returns an event when the phase changes.
    ///
    /// At most one transition happens per call. Progress past the end of a
    /// phase is discarded rather than carried into the next phase.
    pub fn tick(&mut self, elapsed_secs: f64) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        let elapsed = sanitize_delta(elapsed_secs);
        let duration = self.phase_duration_secs();
        let progress = if duration > 0.0 {
            self.progress + elapsed / duration
        } else {
            1.0
        };

        if progress + PROGRESS_EPSILON < 1.0 {
            self.progress = progress;
            return None;
        }
        Some(self.advance())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) -> Event {
        let from = self.phase;
        let to = self.next_phase(from);
        let cycle_completed = match (from.cycle_index(), to.cycle_index()) {
            (Some(f), Some(t)) => t <= f,
            _ => false,
        };

        self.progress = 0.0;
        if cycle_completed {
            self.cycle_count = self.cycle_count.saturating_add(1);
            if self.total_cycles > 0 && self.cycle_count >= self.total_cycles {
                return self.complete(CompletionReason::CycleLimit);
            }
        }

        self.phase = to;
        debug!(%from, %to, cycle_count = self.cycle_count, "phase advanced");
        Event::PhaseAdvanced {
            from,
            to,
            cycle_completed,
            cycle_count: self.cycle_count,
            at: Utc::now(),
        }
    }

    fn complete(&mut self, reason: CompletionReason) -> Event {
        self.phase = Phase::Completed;
        self.progress = 0.0;
        self.is_active = false;
        info!(?reason, cycle_count = self.cycle_count, "breathing session completed");
        Event::SessionCompleted {
            reason,
            cycle_count: self.cycle_count,
            at: Utc::now(),
        }
    }

    fn first_phase(&self) -> Phase {
        self.scan_from(0)
    }

    /// Next phase in cycle order with a non-zero duration.
    fn next_phase(&self, from: Phase) -> Phase {
        self.scan_from(from.cycle_index().map_or(0, |i| i + 1))
    }

    fn scan_from(&self, start: usize) -> Phase {
        let n = Phase::CYCLE.len();
        (0..n)
            .map(|offset| Phase::CYCLE[(start + offset) % n])
            .find(|p| self.pattern.duration_of(*p) > 0.0)
            .unwrap_or(Phase::Inhale)
    }
}
