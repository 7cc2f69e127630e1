//! Frame delta source for driving `tick()` from a render loop.
//!
//! The engine itself holds no timers. A front end keeps one `FrameDriver`
//! and asks it for the seconds since the previous frame.

use std::time::Instant;

/// Default cap on a single frame delta, in seconds.
pub const DEFAULT_MAX_FRAME_SECS: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct FrameDriver {
    last: Option<Instant>,
    max_frame_secs: f64,
}

impl FrameDriver {
    /// A non-finite or non-positive cap falls back to [`DEFAULT_MAX_FRAME_SECS`].
    pub fn new(max_frame_secs: f64) -> Self {
        let max_frame_secs = if max_frame_secs.is_finite() && max_frame_secs > 0.0 {
            max_frame_secs
        } else {
            DEFAULT_MAX_FRAME_SECS
        };
        Self {
            last: None,
            max_frame_secs,
        }
    }

    pub fn max_frame_secs(&self) -> f64 {
        self.max_frame_secs
    }

    /// Seconds since the previous call, clamped to `[0, max_frame_secs]`.
    ///
    /// The first call after construction or `suspend()` returns 0.
    pub fn next_delta(&mut self, now: Instant) -> f64 {
        let delta = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last = Some(now);
        delta.clamp(0.0, self.max_frame_secs)
    }

    /// Forget the previous frame, e.g. while the app is backgrounded, so the
    /// next frame does not report the whole gap.
    pub fn suspend(&mut self) {
        self.last = None;
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_frame_is_zero() {
        let mut d = FrameDriver::default();
        assert_eq!(d.next_delta(Instant::now()), 0.0);
    }

    #[test]
    fn reports_elapsed_between_frames() {
        let mut d = FrameDriver::new(1.0);
        let t0 = Instant::now();
        d.next_delta(t0);
        let delta = d.next_delta(t0 + Duration::from_millis(250));
        assert!((delta - 0.25).abs() < 1e-9);
    }

    #[test]
    fn clamps_large_gaps_and_backwards_time() {
        let mut d = FrameDriver::new(0.5);
        let t0 = Instant::now() + Duration::from_secs(10);
        d.next_delta(t0);
        assert_eq!(d.next_delta(t0 + Duration::from_secs(30)), 0.5);
        assert_eq!(d.next_delta(t0), 0.0);
    }

    #[test]
    fn suspend_drops_the_gap() {
        let mut d = FrameDriver::new(5.0);
        let t0 = Instant::now();
        d.next_delta(t0);
        d.suspend();
        assert_eq!(d.next_delta(t0 + Duration::from_secs(3)), 0.0);
    }

    #[test]
    fn invalid_cap_uses_default() {
        assert_eq!(FrameDriver::new(f64::NAN).max_frame_secs(), DEFAULT_MAX_FRAME_SECS);
        assert_eq!(FrameDriver::new(-1.0).max_frame_secs(), DEFAULT_MAX_FRAME_SECS);
    }
}
