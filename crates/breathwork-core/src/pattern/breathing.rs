use serde::{Deserialize, Serialize};

use crate::clock::Phase;
use crate::error::ValidationError;
use crate::guide::Locale;

/// Text in each supported locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub zh: String,
    #[serde(default)]
    pub en: String,
}

impl LocalizedText {
    pub fn new(zh: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            zh: zh.into(),
            en: en.into(),
        }
    }

    /// Text for `locale`, falling back to the other locale when empty.
    pub fn get(&self, locale: Locale) -> &str {
        let (preferred, other) = match locale {
            Locale::Zh => (&self.zh, &self.en),
            Locale::En => (&self.en, &self.zh),
        };
        if preferred.is_empty() {
            other
        } else {
            preferred
        }
    }
}

/// Colors used by the presentation layer. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: "rgb(99, 102, 241)".into(),
            secondary: "rgb(139, 92, 246)".into(),
            accent: "rgb(94, 234, 212)".into(),
        }
    }
}

/// A named set of phase durations.
///
/// Hold durations of zero mean the phase is skipped entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingPattern {
    pub id: String,
    pub inhale_secs: f64,
    #[serde(default)]
    pub hold_after_inhale_secs: f64,
    pub exhale_secs: f64,
    #[serde(default)]
    pub hold_after_exhale_secs: f64,
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub theme: ColorTheme,
}

impl BreathingPattern {
    /// Pattern with the given durations and empty display metadata.
    pub fn new(
        id: impl Into<String>,
        inhale_secs: f64,
        hold_after_inhale_secs: f64,
        exhale_secs: f64,
        hold_after_exhale_secs: f64,
    ) -> Self {
        Self {
            id: id.into(),
            inhale_secs,
            hold_after_inhale_secs,
            exhale_secs,
            hold_after_exhale_secs,
            name: LocalizedText::default(),
            description: LocalizedText::default(),
            theme: ColorTheme::default(),
        }
    }

    pub fn with_name(mut self, name: LocalizedText) -> Self {
        self.name = name;
        self
    }

    pub fn with_description(mut self, description: LocalizedText) -> Self {
        self.description = description;
        self
    }

    pub fn with_theme(mut self, theme: ColorTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Configured duration of `phase` in seconds. Zero for the bookend states.
    pub fn duration_of(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Inhale => self.inhale_secs,
            Phase::HoldAfterInhale => self.hold_after_inhale_secs,
            Phase::Exhale => self.exhale_secs,
            Phase::HoldAfterExhale => self.hold_after_exhale_secs,
            Phase::NotStarted | Phase::Completed => 0.0,
        }
    }

    /// Length of one full cycle in seconds.
    pub fn cycle_secs(&self) -> f64 {
        self.inhale_secs
            + self.hold_after_inhale_secs
            + self.exhale_secs
            + self.hold_after_exhale_secs
    }

    /// Breathing phases this pattern actually visits, in cycle order.
    pub fn active_phases(&self) -> impl Iterator<Item = Phase> + '_ {
        Phase::CYCLE
            .into_iter()
            .filter(move |p| self.duration_of(*p) > 0.0)
    }

    /// Check the duration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: empty id, non-finite duration,
    /// non-positive inhale/exhale, or negative hold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }

        let fields = [
            ("inhale_secs", self.inhale_secs, true),
            ("hold_after_inhale_secs", self.hold_after_inhale_secs, false),
            ("exhale_secs", self.exhale_secs, true),
            ("hold_after_exhale_secs", self.hold_after_exhale_secs, false),
        ];
        for (field, value, required) in fields {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteDuration { field });
            }
            if required && value <= 0.0 {
                return Err(ValidationError::NonPositiveDuration { field, value });
            }
            if value < 0.0 {
                return Err(ValidationError::NegativeDuration { field, value });
            }
        }
        Ok(())
    }
}
