//! TOML-based user preferences.
//!
//! Stores:
//! - Chosen breathing pattern and user-defined patterns
//! - Cycle limit and session length
//! - Display toggles (visual guide, text guide)
//! - Background music mute and volume
//! - Locale
//!
//! The document is flat and lives under a single namespace table
//! (`[breathing_settings]`) in `~/.config/breathwork/settings.toml`.
//! The breathing engine never touches this store; the front end reads it
//! and configures a `TimerFacade` from it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};
use crate::guide::Locale;
use crate::pattern::{BreathingPattern, DEFAULT_PATTERN_ID};

/// Fixed namespace key for the settings table.
pub const SETTINGS_NAMESPACE: &str = "breathing_settings";
pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_pattern_id")]
    pub pattern_id: String,
    /// 0 means unlimited.
    #[serde(default)]
    pub total_cycles: u32,
    /// 0 means no time limit.
    #[serde(default)]
    pub session_minutes: u32,
    #[serde(default = "default_true")]
    pub show_visual_guide: bool,
    #[serde(default = "default_true")]
    pub show_text_guide: bool,
    #[serde(default = "default_true")]
    pub music_muted: bool,
    /// 0.0 .. 1.0
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub custom_patterns: Vec<BreathingPattern>,
}

/// On-disk shape: the settings nested under the namespace key.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsDocument {
    #[serde(rename = "breathing_settings", default)]
    settings: Settings,
}

fn default_pattern_id() -> String {
    DEFAULT_PATTERN_ID.to_string()
}
fn default_true() -> bool {
    true
}
fn default_volume() -> f64 {
    0.5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pattern_id: default_pattern_id(),
            total_cycles: 0,
            session_minutes: 0,
            show_visual_guide: true,
            show_text_guide: true,
            music_muted: true,
            volume: default_volume(),
            locale: Locale::default(),
            custom_patterns: Vec::new(),
        }
    }
}

impl Settings {
    /// Replace the top-level field `key` in `root`, parsing `value` as the
    /// type the field already has. Keys are flat; there are no dotted paths.
    fn set_json_field(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let obj = root
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(n) = value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                } else {
                    return Err(invalid(format!("cannot parse '{value}' as number")));
                }
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_json::Value::String(value.into()),
        };
        obj.insert(key.to_string(), new_value);
        Ok(())
    }

    /// Default settings file location.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join(SETTINGS_FILE))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed,
    /// or if the default file cannot be written.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a value in
    /// it fails [`Settings::validate`], or if the default file cannot be
    /// written.
    pub fn load_from(path: &Path) -> Result<Self> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let doc: SettingsDocument =
                    toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                doc.settings
                    .validate()
                    .map_err(|e| load_failed(e.to_string()))?;
                Ok(doc.settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.save_to(path)?;
                Ok(settings)
            }
            Err(e) => Err(load_failed(e.to_string()).into()),
        }
    }

    /// Load from the default location, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = %e, "using default settings");
            Self::default()
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let doc = SettingsDocument {
            settings: self.clone(),
        };
        let content = toml::to_string_pretty(&doc)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a top-level value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a top-level value by key, keeping the value's existing type.
    /// `custom_patterns` takes the whole list as JSON.
    ///
    /// Does not save; call [`Settings::save`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. On error `self` is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_field(&mut json, key, value)?;
        let updated: Settings =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check ranges and custom pattern durations.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::InvalidValue {
                key: "volume".into(),
                message: format!("must be between 0 and 1, got {}", self.volume),
            }
            .into());
        }
        for pattern in &self.custom_patterns {
            pattern.validate().map_err(CoreError::from)?;
        }
        Ok(())
    }
}
