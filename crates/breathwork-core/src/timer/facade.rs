//! Display-ready view over the phase clock and session timer.
//!
//! The presentation layer talks only to [`TimerFacade`]: it feeds frame
//! deltas in, calls the control operations on user input, and renders a
//! [`TimerSnapshot`] each frame.
//!
//! Two completion conditions exist and are checked independently: the clock's
//! cycle limit and the session timer's time limit.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::session::SessionTimer;
use crate::clock::{sanitize_delta, Phase, PhaseClock};
use crate::events::{CompletionReason, Event};
use crate::pattern::{BreathingPattern, PatternCatalog};
use crate::storage::Settings;

/// A duration rendered as `mm:ss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    pub fn from_secs(total: u64) -> Self {
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }

    /// Rounds up, so a phase with 0.2s left still reads `00:01`.
    pub fn from_secs_f64(total: f64) -> Self {
        Self::from_secs(sanitize_delta(total).ceil() as u64)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// Read-only per-frame view of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub pattern_id: String,
    pub phase: Phase,
    pub progress: f64,
    pub is_active: bool,
    pub cycle_count: u32,
    pub total_cycles: u32,
    pub remaining_in_cycle_secs: f64,
    pub total_elapsed_secs: u64,
    /// None when the session has no time limit.
    pub total_remaining_secs: Option<u64>,
    pub percent_complete: f64,
    pub is_completed: bool,
}

#[derive(Debug, Clone)]
pub struct TimerFacade {
    catalog: PatternCatalog,
    clock: PhaseClock,
    session: SessionTimer,
}

impl TimerFacade {
    /// Facade on `pattern_id` (default pattern if unknown), no limits.
    pub fn new(catalog: PatternCatalog, pattern_id: &str) -> Self {
        let pattern = catalog.get(pattern_id).clone();
        Self {
            catalog,
            clock: PhaseClock::new(pattern),
            session: SessionTimer::new(0),
        }
    }

    /// Built-in catalog plus the user's custom patterns, with the saved
    /// pattern, cycle limit and session length applied.
    ///
    /// Invalid custom patterns are skipped with a warning.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut catalog = PatternCatalog::builtin();
        for pattern in &settings.custom_patterns {
            if let Err(e) = catalog.insert(pattern.clone()) {
                warn!(pattern_id = %pattern.id, error = %e, "skipping invalid custom pattern");
            }
        }
        let mut facade = Self::new(catalog, &settings.pattern_id);
        facade.set_total_cycles(settings.total_cycles);
        facade.set_session_length_minutes(settings.session_minutes);
        facade
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    pub fn pattern(&self) -> &BreathingPattern {
        self.clock.pattern()
    }

    pub fn phase(&self) -> Phase {
        self.clock.phase()
    }

    pub fn progress(&self) -> f64 {
        self.clock.progress()
    }

    pub fn is_active(&self) -> bool {
        self.clock.is_active()
    }

    pub fn cycle_count(&self) -> u32 {
        self.clock.cycle_count()
    }

    /// Seconds left in the current phase; 0 outside a breathing phase.
    pub fn remaining_in_cycle_secs(&self) -> f64 {
        if !self.clock.phase().is_breathing() {
            return 0.0;
        }
        (self.clock.phase_duration_secs() * (1.0 - self.clock.progress())).max(0.0)
    }

    pub fn total_elapsed_secs(&self) -> u64 {
        self.session.elapsed_secs()
    }

    /// Seconds left in the session, or None without a time limit.
    pub fn total_remaining_secs(&self) -> Option<u64> {
        self.session.remaining_secs()
    }

    /// Session time left as `mm:ss`, or None without a time limit.
    pub fn remaining_countdown(&self) -> Option<Countdown> {
        self.total_remaining_secs().map(Countdown::from_secs)
    }

    /// Current phase time left as `mm:ss`.
    pub fn phase_countdown(&self) -> Countdown {
        Countdown::from_secs_f64(self.remaining_in_cycle_secs())
    }

    /// 0.0 .. 100.0 of the session length elapsed.
    pub fn percent_complete(&self) -> f64 {
        self.session.percent_complete()
    }

    pub fn is_completed(&self) -> bool {
        self.clock.is_completed() || self.session.limit_reached()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            pattern_id: self.pattern().id.clone(),
            phase: self.phase(),
            progress: self.progress(),
            is_active: self.is_active(),
            cycle_count: self.cycle_count(),
            total_cycles: self.clock.total_cycles(),
            remaining_in_cycle_secs: self.remaining_in_cycle_secs(),
            total_elapsed_secs: self.total_elapsed_secs(),
            total_remaining_secs: self.total_remaining_secs(),
            percent_complete: self.percent_complete(),
            is_completed: self.is_completed(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance by one frame. Session time only accrues while the clock runs.
    pub fn tick(&mut self, elapsed_secs: f64) -> Vec<Event> {
        let mut events = Vec::new();
        if !self.clock.is_running() {
            return events;
        }
        let delta = sanitize_delta(elapsed_secs);
        events.extend(self.clock.tick(delta));
        if self.session.accumulate(delta) {
            events.extend(self.clock.finish(CompletionReason::TimeLimit));
        }
        events
    }

    /// Start or resume. A fresh start also clears the session counter.
    pub fn start(&mut self) -> Option<Event> {
        if self.clock.phase() == Phase::NotStarted {
            self.session.reset();
        }
        self.clock.start()
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.clock.pause()
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.clock.is_active() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Event {
        self.session.reset();
        self.clock.reset()
    }

    /// Switch to `pattern_id`, or to the default pattern if it is unknown.
    pub fn change_pattern(&mut self, pattern_id: &str) -> Event {
        let pattern = self.catalog.get(pattern_id).clone();
        self.clock.set_pattern(pattern)
    }

    pub fn set_total_cycles(&mut self, total_cycles: u32) {
        self.clock.set_total_cycles(total_cycles);
    }

    /// 0 disables the time limit.
    ///
    /// A length at or below the time already spent ends a started session
    /// right away, so it cannot be resumed past its limit.
    pub fn set_session_length_secs(&mut self, length_secs: u64) -> Option<Event> {
        self.session.set_length_secs(length_secs);
        if self.session.limit_reached() && self.clock.phase().is_breathing() {
            return self.clock.finish(CompletionReason::TimeLimit);
        }
        None
    }

    pub fn set_session_length_minutes(&mut self, minutes: u32) -> Option<Event> {
        self.set_session_length_secs(u64::from(minutes) * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{BOX_ID, NORMAL_ID};

    fn facade() -> TimerFacade {
        TimerFacade::new(PatternCatalog::builtin(), NORMAL_ID)
    }

    #[test]
    fn countdown_formats_mm_ss() {
        assert_eq!(Countdown::from_secs(65).to_string(), "01:05");
        assert_eq!(Countdown::from_secs_f64(0.2).to_string(), "00:01");
        assert_eq!(Countdown::from_secs_f64(-3.0).to_string(), "00:00");
    }

    #[test]
    fn remaining_in_cycle_tracks_progress() {
        let mut f = facade();
        assert_eq!(f.remaining_in_cycle_secs(), 0.0);
        f.start();
        f.tick(1.0);
        assert_eq!(f.remaining_in_cycle_secs(), 3.0);
        assert_eq!(f.phase_countdown().to_string(), "00:03");
    }

    #[test]
    fn time_limit_completes_session() {
        let mut f = facade();
        f.set_session_length_secs(5);
        f.start();
        let mut events = Vec::new();
        for _ in 0..10 {
            events.extend(f.tick(0.5));
        }
        assert!(f.is_completed());
        assert_eq!(f.phase(), Phase::Completed);
        assert!(!f.is_active());
        assert_eq!(f.percent_complete(), 100.0);
        assert!(events.iter().any(|e| matches!(
            e,
            Event::SessionCompleted {
                reason: CompletionReason::TimeLimit,
                ..
            }
        )));
    }

    #[test]
    fn paused_time_does_not_count() {
        let mut f = facade();
        f.set_session_length_minutes(1);
        f.start();
        f.tick(2.0);
        f.pause();
        f.tick(30.0);
        assert_eq!(f.total_elapsed_secs(), 2);
        assert_eq!(f.total_remaining_secs(), Some(58));
        assert_eq!(f.remaining_countdown().map(|c| c.to_string()).as_deref(), Some("00:58"));
    }

    #[test]
    fn unknown_pattern_falls_back() {
        let mut f = TimerFacade::new(PatternCatalog::builtin(), "nope");
        assert_eq!(f.pattern().id, NORMAL_ID);
        f.change_pattern(BOX_ID);
        assert_eq!(f.pattern().id, BOX_ID);
        f.change_pattern("still-nope");
        assert_eq!(f.pattern().id, NORMAL_ID);
    }

    #[test]
    fn reset_clears_session_counter() {
        let mut f = facade();
        f.set_session_length_secs(100);
        f.start();
        f.tick(3.0);
        f.reset();
        assert_eq!(f.total_elapsed_secs(), 0);
        assert_eq!(f.phase(), Phase::NotStarted);
        assert!(!f.is_completed());
    }

    #[test]
    fn shortened_length_finishes_paused_session() {
        let mut f = facade();
        f.set_session_length_secs(60);
        f.start();
        f.tick(3.0);
        f.pause();
        let event = f.set_session_length_secs(2);
        assert!(matches!(
            event,
            Some(Event::SessionCompleted {
                reason: CompletionReason::TimeLimit,
                ..
            })
        ));
        assert_eq!(f.phase(), Phase::Completed);
        assert!(f.toggle().is_none());
        assert!(!f.is_active());
        assert!(f.is_completed());
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut f = facade();
        f.set_total_cycles(3);
        f.start();
        f.tick(2.0);
        let snap = f.snapshot();
        assert_eq!(snap.pattern_id, NORMAL_ID);
        assert_eq!(snap.phase, Phase::Inhale);
        assert_eq!(snap.progress, 0.5);
        assert_eq!(snap.total_cycles, 3);
        assert_eq!(snap.total_remaining_secs, None);
        assert!(snap.is_active);
        assert!(!snap.is_completed);
    }
}
