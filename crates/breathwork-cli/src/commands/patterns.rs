use breathwork_core::{PatternCatalog, Settings, TimerFacade};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum PatternsAction {
    /// List built-in and custom patterns
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one pattern (unknown ids show the default)
    Show {
        /// Pattern id, e.g. "box"
        id: String,
    },
}

pub fn run(action: PatternsAction) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default();
    let facade = TimerFacade::from_settings(&settings);
    let catalog: &PatternCatalog = facade.catalog();
    let locale = settings.locale;

    match action {
        PatternsAction::List { json } => {
            if json {
                let patterns: Vec<_> = catalog.iter().collect();
                println!("{}", serde_json::to_string_pretty(&patterns)?);
            } else {
                for p in catalog.iter() {
                    let marker = if p.id == settings.pattern_id { "*" } else { " " };
                    println!(
                        "{marker} {:<12} {:>4}/{:>4}/{:>4}/{:>4}  {}",
                        p.id,
                        p.inhale_secs,
                        p.hold_after_inhale_secs,
                        p.exhale_secs,
                        p.hold_after_exhale_secs,
                        p.name.get(locale),
                    );
                }
            }
        }
        PatternsAction::Show { id } => {
            let pattern = catalog.get(&id);
            println!("{}", serde_json::to_string_pretty(pattern)?);
            println!("cycle: {}s", pattern.cycle_secs());
            println!("{}", pattern.description.get(locale));
        }
    }
    Ok(())
}
