use serde::{Deserialize, Serialize};

use crate::clock::sanitize_delta;

/// Fractional carry within this distance of a whole second rolls over.
const CARRY_EPSILON: f64 = 1e-9;

/// Whole-second session counter, independent of phase progress.
///
/// Deltas arrive at frame cadence; the sub-second remainder is carried
/// between calls so irregular cadence never double-counts or drops time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionTimer {
    /// Session length in seconds; 0 means no time limit.
    length_secs: u64,
    elapsed_secs: u64,
    #[serde(default)]
    carry_secs: f64,
}

impl SessionTimer {
    pub fn new(length_secs: u64) -> Self {
        Self {
            length_secs,
            elapsed_secs: 0,
            carry_secs: 0.0,
        }
    }

    pub fn set_length_secs(&mut self, length_secs: u64) {
        self.length_secs = length_secs;
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_unlimited(&self) -> bool {
        self.length_secs == 0
    }

    /// Seconds left in the session, or None without a time limit.
    pub fn remaining_secs(&self) -> Option<u64> {
        if self.is_unlimited() {
            None
        } else {
            Some(self.length_secs.saturating_sub(self.elapsed_secs))
        }
    }

    /// 0.0 .. 100.0 of the session length elapsed. 0 without a time limit.
    pub fn percent_complete(&self) -> f64 {
        if self.is_unlimited() {
            return 0.0;
        }
        (self.elapsed_secs as f64 / self.length_secs as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn limit_reached(&self) -> bool {
        !self.is_unlimited() && self.elapsed_secs >= self.length_secs
    }

    /// Add a frame delta. Returns whether the time limit has been reached.
    pub fn accumulate(&mut self, delta_secs: f64) -> bool {
        self.carry_secs += sanitize_delta(delta_secs);
        let whole = (self.carry_secs + CARRY_EPSILON).floor();
        if whole >= 1.0 {
            self.elapsed_secs = self.elapsed_secs.saturating_add(whole as u64);
            self.carry_secs = (self.carry_secs - whole).max(0.0);
        }
        self.limit_reached()
    }

    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
        self.carry_secs = 0.0;
    }
}
