mod facade;
mod session;

pub use facade::{Countdown, TimerFacade, TimerSnapshot};
pub use session::SessionTimer;
