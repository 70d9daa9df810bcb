pub mod repl;
pub mod styles;
pub mod tables;

use crate::clock::format_seconds;
use crate::domain::{CompletedTask, PausedTask};
use crate::tracker::{ActiveStatus, Resumed, Started};
use styles::{error_style, hint_style, info_style, paused_style, resumed_style, success_style};

pub const HELP_TEXT: &str = "\
TrackMe commands:
  start [task name]        Start a task (prompts when no name is given)
  pause                    Pause the active task
  resume <id>              Resume a paused task
  stop [<id>]              Stop the active task, or a paused task by id
  complete [<id>]          Complete a paused or active task without resuming it
  status                   Show the active task
  viewday [YYYY-MM-DD]     Tasks for a day (default today)
  viewweek [YYYY-MM-DD]    Totals for the week containing a date
  viewmonth [YYYY MM]      Totals for a month (default this month)
  paused                   List paused tasks
  help                     Show this help
  exit                     Quit";

pub fn print_banner() {
    println!("{}", info_style("🎯 TrackMe interactive mode. Type help for commands, exit to quit.".to_string()));
}

pub fn print_help() {
    println!("{}", HELP_TEXT);
}

fn print_auto_paused(paused: Option<&PausedTask>) {
    if let Some(paused) = paused {
        println!(
            "{}",
            paused_style(format!(
                "⏸ Auto-paused: {} (ID: {}) at {}",
                paused.info.task_name,
                paused.id(),
                format_seconds(paused.elapsed)
            ))
        );
    }
}

pub fn print_started(started: &Started) {
    print_auto_paused(started.auto_paused.as_ref());
    println!(
        "{}",
        success_style(format!(
            "✅ Started task: {} (ID: {})",
            started.task.info.task_name,
            started.task.id()
        ))
    );
    println!("{}", hint_style("⏳ Tracking... use stop, pause or resume <id> to switch".to_string()));
}

pub fn print_paused(paused: &PausedTask) {
    println!(
        "{}",
        paused_style(format!(
            "⏸ Task paused: {} at {}",
            paused.info.task_name,
            format_seconds(paused.elapsed)
        ))
    );
}

pub fn print_resumed(resumed: &Resumed) {
    print_auto_paused(resumed.auto_paused.as_ref());
    println!(
        "{}",
        resumed_style(format!(
            "▶️ Resumed: {} (ID: {})",
            resumed.task.info.task_name,
            resumed.task.id()
        ))
    );
}

/// `verb` is e.g. "Stopped task" or "Completed task"
pub fn print_completed(verb: &str, task: &CompletedTask) {
    println!(
        "{}",
        success_style(format!(
            "✅ {}: {} - Duration: {}",
            verb,
            task.info.task_name,
            format_seconds(task.duration)
        ))
    );
}

pub fn print_status(status: Option<&ActiveStatus>) {
    match status {
        Some(status) => println!(
            "{}",
            info_style(format!(
                "[Active] {} {} - Elapsed: {}",
                status.task.id(),
                status.task.info.task_name,
                format_seconds(status.elapsed)
            ))
        ),
        None => println!("No active task."),
    }
}

/// A command that was understood but could not be carried out
pub fn print_notice(message: &str) {
    println!("{}", message);
}

pub fn print_error(message: &str) {
    eprintln!("{}", error_style(message.to_string()));
}

pub fn print_goodbye() {
    println!("👋 Goodbye!");
}
