//! # Breathwork Core Library
//!
//! This library provides the engine behind the Breathwork guided-breathing
//! app. Everything here is presentation-agnostic: a front end (the bundled
//! CLI, or any GUI) feeds frame deltas in and renders what comes out.
//!
//! ## Architecture
//!
//! - **Pattern Catalog**: Named, immutable sets of phase durations
//! - **Phase Clock**: A delta-driven state machine that requires the caller
//!   to invoke `tick()` once per frame
//! - **Timer Facade**: Derived display values (countdowns, percent complete)
//!   and the control surface used by the front end
//! - **Storage**: TOML-based user settings
//!
//! ## Key Components
//!
//! - [`PatternCatalog`]: Built-in and custom breathing patterns
//! - [`PhaseClock`]: Core phase state machine
//! - [`TimerFacade`]: Single entry point for presentation
//! - [`Settings`]: User preference document

pub mod clock;
pub mod driver;
pub mod error;
pub mod events;
pub mod guide;
pub mod pattern;
pub mod storage;
pub mod timer;

pub use clock::{Phase, PhaseClock};
pub use driver::FrameDriver;
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{CompletionReason, Event};
pub use guide::Locale;
pub use pattern::{BreathingPattern, ColorTheme, LocalizedText, PatternCatalog};
pub use storage::Settings;
pub use timer::{Countdown, SessionTimer, TimerFacade, TimerSnapshot};
