use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use breathwork_core::guide::{self, Locale};
use breathwork_core::{Event, FrameDriver, Settings, TimerFacade};
use clap::Args;
use tracing::{debug, info, warn};

/// Largest delta fed to the engine in one frame, e.g. after the process was stopped.
const MAX_FRAME_SECS: f64 = 0.5;

const CONTROLS_HELP: &str =
    "controls: <enter>/p start-pause, r reset, n next pattern, l language, q quit";

#[derive(Args)]
pub struct SessionArgs {
    /// Pattern id (defaults to the saved pattern)
    #[arg(long)]
    pattern: Option<String>,
    /// Number of cycles, 0 for unlimited (defaults to the saved value)
    #[arg(long)]
    cycles: Option<u32>,
    /// Session length in minutes, 0 for no limit (defaults to the saved value)
    #[arg(long)]
    minutes: Option<u32>,
    /// Frame interval in milliseconds
    #[arg(long, default_value = "16")]
    frame_ms: u64,
    /// Prompt language: zh or en (defaults to the saved locale)
    #[arg(long)]
    locale: Option<String>,
}

/// A line of keyboard input during `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Toggle,
    Reset,
    NextPattern,
    SwitchLocale,
    Quit,
}

impl Control {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" | "p" => Some(Control::Toggle),
            "r" => Some(Control::Reset),
            "n" => Some(Control::NextPattern),
            "l" => Some(Control::SwitchLocale),
            "q" => Some(Control::Quit),
            _ => None,
        }
    }
}

/// Read controls from stdin on a separate thread. The receiver disconnects
/// when stdin closes.
fn spawn_controls() -> Receiver<Control> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match Control::parse(&line) {
                Some(control) => {
                    if tx.send(control).is_err() {
                        break;
                    }
                }
                None => warn!(input = %line.trim(), "unknown control"),
            }
        }
    });
    rx
}

struct Session {
    facade: TimerFacade,
    locale: Locale,
    show_text_guide: bool,
    frame: Duration,
}

fn prepare(args: SessionArgs) -> Result<Session, Box<dyn std::error::Error>> {
    let mut settings = Settings::load_or_default();
    if let Some(pattern) = args.pattern {
        settings.pattern_id = pattern;
    }
    if let Some(cycles) = args.cycles {
        settings.total_cycles = cycles;
    }
    if let Some(minutes) = args.minutes {
        settings.session_minutes = minutes;
    }
    let locale = match args.locale {
        Some(code) => code.parse::<Locale>()?,
        None => settings.locale,
    };

    let facade = TimerFacade::from_settings(&settings);
    info!(
        pattern_id = %facade.pattern().id,
        total_cycles = settings.total_cycles,
        session_minutes = settings.session_minutes,
        locale = locale.code(),
        "session prepared"
    );
    Ok(Session {
        facade,
        locale,
        show_text_guide: settings.show_text_guide,
        frame: Duration::from_millis(args.frame_ms.max(1)),
    })
}

impl Session {
    fn status_line(&self) -> String {
        let snap = self.facade.snapshot();
        let text = if self.show_text_guide {
            guide::prompt(snap.phase, snap.is_active, self.locale)
        } else {
            guide::phase_label(snap.phase, self.locale)
        };
        let mut line = format!("[{}] {text}", self.facade.phase_countdown());
        let indicator = guide::cycle_indicator(snap.cycle_count, snap.total_cycles, self.locale);
        if let Some(cycles) = indicator {
            line.push_str(&format!("  {cycles}"));
        }
        if let Some(remaining) = self.facade.remaining_countdown() {
            line.push_str(&format!("  ({remaining})"));
        }
        line
    }

    fn render(&self, event: &Event) {
        debug!(at = %event.at(), ?event, "session event");
        match event {
            Event::SessionCompleted {
                reason,
                cycle_count,
                ..
            } => {
                println!(
                    "{} ({cycle_count} cycles, {:?}, {}s)",
                    guide::prompt(self.facade.phase(), false, self.locale),
                    reason,
                    self.facade.total_elapsed_secs()
                );
            }
            Event::PatternChanged { .. } => {
                println!("{}", self.facade.pattern().name.get(self.locale));
                println!("{}", self.status_line());
            }
            _ => println!("{}", self.status_line()),
        }
    }

    /// Id of the catalog entry after the current pattern, wrapping around.
    fn next_pattern_id(&self) -> Option<String> {
        let catalog = self.facade.catalog();
        let current = &self.facade.pattern().id;
        catalog
            .iter()
            .skip_while(|p| &p.id != current)
            .nth(1)
            .or_else(|| catalog.iter().next())
            .map(|p| p.id.clone())
    }

    fn apply(&mut self, control: Control) {
        match control {
            Control::Toggle => {
                if let Some(event) = self.facade.toggle() {
                    self.render(&event);
                }
            }
            Control::Reset => {
                let event = self.facade.reset();
                self.render(&event);
            }
            Control::NextPattern => {
                if let Some(id) = self.next_pattern_id() {
                    let event = self.facade.change_pattern(&id);
                    self.render(&event);
                }
            }
            Control::SwitchLocale => {
                self.locale = self.locale.toggle();
                info!(locale = self.locale.code(), "locale switched");
                println!("{}", self.status_line());
            }
            Control::Quit => {}
        }
    }
}

/// Real-time loop: sleeps one frame interval between ticks and applies
/// controls typed on stdin. Ends on completion or `q`.
pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = prepare(args)?;
    let mut driver = FrameDriver::new(MAX_FRAME_SECS);
    let controls = spawn_controls();

    println!("{}", session.facade.pattern().name.get(session.locale));
    println!("{CONTROLS_HELP}");
    if let Some(event) = session.facade.start() {
        session.render(&event);
    }

    while !session.facade.is_completed() {
        while let Ok(control) = controls.try_recv() {
            if control == Control::Quit {
                return Ok(());
            }
            session.apply(control);
        }
        std::io::stdout().flush()?;
        std::thread::sleep(session.frame);

        // Paused or reset: drop the gap so resuming starts from a zero delta.
        if !session.facade.is_active() {
            driver.suspend();
            continue;
        }
        let delta = driver.next_delta(Instant::now());
        for event in session.facade.tick(delta) {
            session.render(&event);
        }
    }
    std::io::stdout().flush()?;
    Ok(())
}

/// Deterministic loop: fixed delta per frame, one JSON event per line,
/// then the final snapshot.
pub fn simulate(args: SessionArgs, max_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = prepare(args)?;
    let delta = session.frame.as_secs_f64();
    let max_frames = (max_secs as f64 / delta).ceil() as u64;

    if let Some(event) = session.facade.start() {
        println!("{}", serde_json::to_string(&event)?);
    }
    for _ in 0..max_frames {
        if session.facade.is_completed() {
            break;
        }
        for event in session.facade.tick(delta) {
            println!("{}", serde_json::to_string(&event)?);
        }
    }
    println!("{}", serde_json::to_string_pretty(&session.facade.snapshot())?);
    Ok(())
}
