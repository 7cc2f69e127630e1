mod engine;
mod phase;

pub use engine::{sanitize_delta, PhaseClock, PROGRESS_EPSILON};
pub use phase::Phase;
