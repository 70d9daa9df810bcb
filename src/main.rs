mod clock;
mod domain;
mod input;
mod persistence;
mod report;
mod tracker;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clock::SystemClock;
use input::{handle_intent, Intent};
use persistence::{get_data_dir, Store};
use tracker::Tracker;
use ui::repl::LinePrompter;

#[derive(Parser)]
#[command(name = "trackme")]
#[command(version, about = "A small terminal time tracker for tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// One-shot commands; the same verbs work in interactive mode
#[derive(Subcommand)]
enum Commands {
    /// Start a task (prompts for details when no name is given)
    Start {
        /// Task name; multiple words are joined with spaces
        name: Vec<String>,
    },
    /// Pause the active task
    Pause,
    /// Resume a paused task by id
    Resume { id: Option<String> },
    /// Stop the active task, or a paused task by id
    Stop { id: Option<String> },
    /// Complete a paused or active task without resuming it
    Complete { id: Option<String> },
    /// Show the active task
    Status,
    /// Tasks for a day (YYYY-MM-DD, default today)
    Viewday { date: Option<String> },
    /// Totals for the week containing a date (YYYY-MM-DD, default today)
    Viewweek { date: Option<String> },
    /// Totals for a month (default this month)
    Viewmonth {
        year: Option<String>,
        month: Option<String>,
    },
}

impl Commands {
    /// Same words the interactive prompt would see
    fn into_words(self) -> Vec<String> {
        fn with(command: &str, args: impl IntoIterator<Item = Option<String>>) -> Vec<String> {
            std::iter::once(command.to_string()).chain(args.into_iter().flatten()).collect()
        }

        match self {
            Self::Start { name } => with("start", name.into_iter().map(Some)),
            Self::Pause => with("pause", []),
            Self::Resume { id } => with("resume", [id]),
            Self::Stop { id } => with("stop", [id]),
            Self::Complete { id } => with("complete", [id]),
            Self::Status => with("status", []),
            Self::Viewday { date } => with("viewday", [date]),
            Self::Viewweek { date } => with("viewweek", [date]),
            Self::Viewmonth { year, month } => with("viewmonth", [year, month]),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut tracker = open_tracker()?;
    match cli.command {
        Some(command) => run_once(&mut tracker, command),
        None => ui::repl::run(&mut tracker),
    }
}

fn open_tracker() -> Result<Tracker<SystemClock>> {
    let data_dir = get_data_dir()?;
    let store = Store::open(&data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    log::info!("Using data directory {}", store.dir().display());

    Ok(Tracker::new(store, SystemClock))
}

/// Run a single command and exit. Storage failures give a non-zero status.
fn run_once(tracker: &mut Tracker<SystemClock>, command: Commands) -> Result<()> {
    let intent = match Intent::parse_words(&command.into_words()) {
        Ok(Some(intent)) => intent,
        Ok(None) => return Ok(()),
        Err(e) => {
            ui::print_error(&e.to_string());
            return Ok(());
        }
    };

    let mut prompter = LinePrompter::new()?;
    handle_intent(tracker, intent, &mut prompter).context("Command failed")?;
    Ok(())
}
