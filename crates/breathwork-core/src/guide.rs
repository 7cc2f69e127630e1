//! Localized phase prompts for the text guide.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clock::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    /// The other locale; the language switch only ever flips between two.
    pub fn toggle(self) -> Self {
        match self {
            Locale::Zh => Locale::En,
            Locale::En => Locale::Zh,
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    /// Accepts the same codes the settings file stores: `zh` and `en`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh" => Ok(Locale::Zh),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// Short label for a phase, as shown next to the countdown.
pub fn phase_label(phase: Phase, locale: Locale) -> &'static str {
    match (locale, phase) {
        (Locale::Zh, Phase::Inhale) => "吸氣",
        (Locale::Zh, Phase::HoldAfterInhale | Phase::HoldAfterExhale) => "屏息",
        (Locale::Zh, Phase::Exhale) => "呼氣",
        (Locale::Zh, Phase::NotStarted) => "準備",
        (Locale::Zh, Phase::Completed) => "完成",
        (Locale::En, Phase::Inhale) => "Inhale",
        (Locale::En, Phase::HoldAfterInhale | Phase::HoldAfterExhale) => "Hold",
        (Locale::En, Phase::Exhale) => "Exhale",
        (Locale::En, Phase::NotStarted) => "Ready",
        (Locale::En, Phase::Completed) => "Done",
    }
}

/// Guide line for the current state. Paused and not-yet-started sessions
/// both show the "get ready" line.
pub fn prompt(phase: Phase, is_active: bool, locale: Locale) -> &'static str {
    if phase == Phase::Completed {
        return match locale {
            Locale::Zh => "練習完成",
            Locale::En => "Session complete",
        };
    }
    if !is_active {
        return match locale {
            Locale::Zh => "準備開始...",
            Locale::En => "Get ready...",
        };
    }
    match (locale, phase) {
        (Locale::Zh, Phase::Inhale) => "吸氣...",
        (Locale::Zh, Phase::Exhale) => "呼氣...",
        (Locale::Zh, Phase::HoldAfterInhale) => "屏息...",
        (Locale::Zh, Phase::HoldAfterExhale) => "靜止...",
        (Locale::Zh, _) => "關注呼吸...",
        (Locale::En, Phase::Inhale) => "Breathe in...",
        (Locale::En, Phase::Exhale) => "Breathe out...",
        (Locale::En, Phase::HoldAfterInhale) => "Hold...",
        (Locale::En, Phase::HoldAfterExhale) => "Rest...",
        (Locale::En, _) => "Focus on your breath...",
    }
}

/// "Cycle n / N" for the cycle currently in progress. None without a cycle limit.
pub fn cycle_indicator(cycle_count: u32, total_cycles: u32, locale: Locale) -> Option<String> {
    if total_cycles == 0 {
        return None;
    }
    let current = cycle_count.saturating_add(1).min(total_cycles);
    Some(match locale {
        Locale::Zh => format!("循環 {current} / {total_cycles}"),
        Locale::En => format!("Cycle {current} / {total_cycles}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locale_codes() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("zh".parse::<Locale>(), Ok(Locale::Zh));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn parse_agrees_with_settings_encoding() {
        for code in ["zh", "en", "ZH", "En", "zh-tw", "en-us", " en", "fr", ""] {
            let parsed = code.parse::<Locale>().ok();
            let decoded = serde_json::from_value::<Locale>(serde_json::json!(code)).ok();
            assert_eq!(parsed, decoded, "disagreement on {code:?}");
        }
        for locale in [Locale::Zh, Locale::En] {
            assert_eq!(locale.code().parse::<Locale>(), Ok(locale));
            assert_eq!(serde_json::to_value(locale).unwrap(), locale.code());
        }
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(Locale::Zh.toggle(), Locale::En);
        assert_eq!(Locale::En.toggle().toggle(), Locale::En);
    }

    #[test]
    fn inactive_prompt_is_get_ready() {
        assert_eq!(prompt(Phase::Exhale, false, Locale::En), "Get ready...");
        assert_eq!(prompt(Phase::Inhale, true, Locale::Zh), "吸氣...");
    }

    #[test]
    fn hold_labels_match_both_holds() {
        assert_eq!(phase_label(Phase::HoldAfterInhale, Locale::En), "Hold");
        assert_eq!(phase_label(Phase::HoldAfterExhale, Locale::En), "Hold");
    }

    #[test]
    fn cycle_indicator_only_with_limit() {
        assert_eq!(cycle_indicator(0, 0, Locale::En), None);
        assert_eq!(cycle_indicator(0, 5, Locale::En).as_deref(), Some("Cycle 1 / 5"));
        assert_eq!(cycle_indicator(5, 5, Locale::Zh).as_deref(), Some("循環 5 / 5"));
    }
}
