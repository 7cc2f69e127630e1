mod breathing;
mod catalog;

pub use breathing::{BreathingPattern, ColorTheme, LocalizedText};
pub use catalog::{PatternCatalog, BOX_ID, DEFAULT_PATTERN_ID, NORMAL_ID, RELAX_478_ID};
