//! Core error types for breathwork-core.
//!
//! The breathing engine itself never fails: unknown pattern ids fall back to
//! the default pattern and bad frame deltas are clamped. Errors only arise at
//! the edges -- validating user-defined patterns and loading or saving the
//! settings document.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for breathwork-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors (settings key walk, event output)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML decoding errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML encoding errors
    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load settings
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save settings
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Value has the wrong type or is out of range
    #[error("Invalid settings value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the settings document
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    /// Could not determine where settings live
    #[error("Settings directory unavailable: {0}")]
    NoDataDir(String),
}

/// Validation errors for user-defined breathing patterns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Pattern id is empty or whitespace
    #[error("Pattern id must not be empty")]
    EmptyId,

    /// Inhale and exhale must take some time
    #[error("Duration of '{field}' must be greater than zero, got {value}")]
    NonPositiveDuration { field: &'static str, value: f64 },

    /// Hold durations may be zero but not negative
    #[error("Duration of '{field}' must not be negative, got {value}")]
    NegativeDuration { field: &'static str, value: f64 },

    /// NaN or infinity
    #[error("Duration of '{field}' must be a finite number")]
    NonFiniteDuration { field: &'static str },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
