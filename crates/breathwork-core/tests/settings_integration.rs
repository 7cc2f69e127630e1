//! Integration tests for the settings document on disk.

use breathwork_core::storage::SETTINGS_FILE;
use breathwork_core::{BreathingPattern, ConfigError, CoreError, Locale, Settings};
use tempfile::TempDir;

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE);

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings, Settings::default());
    assert!(path.exists());

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[breathing_settings]"));
}

#[test]
fn save_then_load_preserves_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE);

    let mut settings = Settings::default();
    settings.set("pattern_id", "box").unwrap();
    settings.set("total_cycles", "6").unwrap();
    settings.set("session_minutes", "10").unwrap();
    settings.set("locale", "en").unwrap();
    settings.set("show_visual_guide", "false").unwrap();
    settings.custom_patterns.push(BreathingPattern::new("long", 5.0, 2.0, 7.0, 1.0));
    settings.save_to(&path).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(loaded.locale, Locale::En);
    assert_eq!(loaded.custom_patterns[0].hold_after_exhale_secs, 1.0);
}

#[test]
fn malformed_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, "[breathing_settings]\ntotal_cycles = \"many\"\n").unwrap();

    let err = Settings::load_from(&path).unwrap_err();
    assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
}

#[test]
fn hand_written_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(
        &path,
        r#"
[breathing_settings]
pattern_id = "relax_478"

[[breathing_settings.custom_patterns]]
id = "coherent"
inhale_secs = 5.5
exhale_secs = 5.5
"#,
    )
    .unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.pattern_id, "relax_478");
    assert!(settings.show_text_guide);
    assert_eq!(settings.custom_patterns.len(), 1);
    assert_eq!(settings.custom_patterns[0].hold_after_inhale_secs, 0.0);
}

#[test]
fn out_of_range_file_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, "[breathing_settings]\nvolume = 7.0\n").unwrap();

    let err = Settings::load_from(&path).unwrap_err();
    assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
    assert!(err.to_string().contains("volume"));
}

#[test]
fn invalid_custom_pattern_in_file_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(
        &path,
        r#"
[breathing_settings]
[[breathing_settings.custom_patterns]]
id = "stuck"
inhale_secs = 0.0
exhale_secs = 4.0
"#,
    )
    .unwrap();

    assert!(matches!(
        Settings::load_from(&path),
        Err(CoreError::Config(ConfigError::LoadFailed { .. }))
    ));
}

#[test]
fn loaded_settings_accept_unrelated_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, "[breathing_settings]\nvolume = 0.9\n").unwrap();

    let mut settings = Settings::load_from(&path).unwrap();
    settings.set("total_cycles", "3").unwrap();
    settings.save_to(&path).unwrap();

    let reloaded = Settings::load_from(&path).unwrap();
    assert_eq!(reloaded.total_cycles, 3);
    assert_eq!(reloaded.volume, 0.9);
}
