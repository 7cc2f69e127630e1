//! Named breathing patterns.
//!
//! The catalog always holds at least the default pattern, so lookups can fall
//! back to it instead of failing.

use tracing::warn;

use super::breathing::{BreathingPattern, ColorTheme, LocalizedText};
use crate::error::ValidationError;

pub const NORMAL_ID: &str = "normal";
pub const RELAX_478_ID: &str = "relax_478";
pub const BOX_ID: &str = "box";

/// Id of the pattern used when nothing else is requested.
pub const DEFAULT_PATTERN_ID: &str = NORMAL_ID;

#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: Vec<BreathingPattern>,
    default_index: usize,
}

impl PatternCatalog {
    /// The built-in patterns, with `normal` as the default.
    pub fn builtin() -> Self {
        Self {
            patterns: vec![normal(), relax_478(), box_breathing()],
            default_index: 0,
        }
    }

    /// Pattern with `id`, or the default when `id` is unknown.
    pub fn get(&self, id: &str) -> &BreathingPattern {
        match self.find(id) {
            Some(p) => p,
            None => {
                warn!(pattern_id = id, fallback = %self.default_pattern().id, "unknown pattern id");
                self.default_pattern()
            }
        }
    }

    /// Exact lookup, ignoring ASCII case.
    pub fn find(&self, id: &str) -> Option<&BreathingPattern> {
        let id = id.trim();
        self.patterns.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    pub fn default_pattern(&self) -> &BreathingPattern {
        &self.patterns[self.default_index]
    }

    /// Add a pattern, replacing any existing one with the same id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the pattern's durations are invalid.
    pub fn insert(&mut self, pattern: BreathingPattern) -> Result<(), ValidationError> {
        pattern.validate()?;
        match self
            .patterns
            .iter_mut()
            .find(|p| p.id.eq_ignore_ascii_case(&pattern.id))
        {
            Some(existing) => *existing = pattern,
            None => self.patterns.push(pattern),
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BreathingPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normal() -> BreathingPattern {
    BreathingPattern::new(NORMAL_ID, 4.0, 0.0, 4.0, 0.0)
        .with_name(LocalizedText::new("一般呼吸", "Normal Breathing"))
        .with_description(LocalizedText::new(
            "平衡的吸氣和呼氣節奏，有助於放鬆和冥想",
            "Balanced inhale and exhale rhythm for relaxation and meditation",
        ))
        .with_theme(ColorTheme::default())
}

fn relax_478() -> BreathingPattern {
    BreathingPattern::new(RELAX_478_ID, 4.0, 7.0, 8.0, 0.0)
        .with_name(LocalizedText::new("4-7-8 放鬆呼吸法", "4-7-8 Relaxing Breath"))
        .with_description(LocalizedText::new(
            "吸氣4秒，屏息7秒，呼氣8秒，有助於減輕壓力和焦慮",
            "Inhale 4s, hold 7s, exhale 8s to ease stress and anxiety",
        ))
        .with_theme(ColorTheme {
            primary: "rgb(79, 70, 229)".into(),
            secondary: "rgb(124, 58, 237)".into(),
            accent: "rgb(236, 72, 153)".into(),
        })
}

fn box_breathing() -> BreathingPattern {
    BreathingPattern::new(BOX_ID, 4.0, 4.0, 4.0, 4.0)
        .with_name(LocalizedText::new("方塊呼吸法", "Box Breathing"))
        .with_description(LocalizedText::new(
            "吸氣，屏息，呼氣，屏息各4秒，形成一個\"方塊\"節奏",
            "Inhale, hold, exhale, hold for 4s each, tracing a \"box\"",
        ))
        .with_theme(ColorTheme {
            primary: "rgb(59, 130, 246)".into(),
            secondary: "rgb(16, 185, 129)".into(),
            accent: "rgb(250, 204, 21)".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_three_patterns() {
        let c = PatternCatalog::builtin();
        assert_eq!(c.len(), 3);
        assert_eq!(c.default_pattern().id, NORMAL_ID);
    }

    #[test]
    fn builtin_patterns_are_valid() {
        let c = PatternCatalog::builtin();
        for p in c.iter() {
            assert!(p.validate().is_ok(), "{} failed validation", p.id);
        }
    }

    #[test]
    fn get_falls_back_to_default() {
        let c = PatternCatalog::builtin();
        assert_eq!(c.get("does-not-exist").id, NORMAL_ID);
        assert_eq!(c.get("").id, NORMAL_ID);
    }

    #[test]
    fn lookup_ignores_case() {
        let c = PatternCatalog::builtin();
        assert_eq!(c.get("BOX").id, BOX_ID);
        assert_eq!(c.get("Relax_478").hold_after_inhale_secs, 7.0);
    }

    #[test]
    fn insert_replaces_same_id() {
        let mut c = PatternCatalog::builtin();
        c.insert(BreathingPattern::new("box", 5.0, 5.0, 5.0, 5.0))
            .unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.get("box").inhale_secs, 5.0);
    }

    #[test]
    fn insert_rejects_invalid() {
        let mut c = PatternCatalog::builtin();
        assert!(c.insert(BreathingPattern::new("bad", 4.0, 0.0, 0.0, 0.0)).is_err());
        assert!(c.find("bad").is_none());
    }
}
