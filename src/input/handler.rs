use super::intent::Intent;
use crate::clock::Clock;
use crate::persistence::StoreError;
use crate::report::{day_view, month_range, month_view, week_range, week_view};
use crate::tracker::{TrackError, TrackResult, Tracker};
use crate::ui;
use chrono::Datelike;

/// Whether the interactive loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Source of follow-up answers (task name, category, notes)
pub trait Prompter {
    /// Ask for one line; None when input is closed or interrupted
    fn ask(&mut self, label: &str) -> Option<String>;
}

/// Parse and run one line of interactive input.
///
/// Input errors are reported and leave the session running; only storage
/// failures come back as errors.
pub fn handle_line<C: Clock>(
    tracker: &mut Tracker<C>,
    line: &str,
    prompter: &mut dyn Prompter,
) -> Result<Flow, StoreError> {
    match Intent::parse_line(line) {
        Ok(Some(intent)) => handle_intent(tracker, intent, prompter),
        Ok(None) => Ok(Flow::Continue),
        Err(e) => {
            ui::print_error(&e.to_string());
            Ok(Flow::Continue)
        }
    }
}

/// Run one intent against the tracker and print the outcome
pub fn handle_intent<C: Clock>(
    tracker: &mut Tracker<C>,
    intent: Intent,
    prompter: &mut dyn Prompter,
) -> Result<Flow, StoreError> {
    match intent {
        Intent::Start { name } => {
            let result = match name {
                Some(name) => tracker.start(&name, "", ""),
                None => match ask_task_details(prompter) {
                    Some((name, category, notes)) => tracker.start(&name, &category, &notes),
                    None => Err(TrackError::EmptyName),
                },
            };
            report(result, |started| ui::print_started(&started))?;
        }
        Intent::Pause => report(tracker.pause(), |paused| ui::print_paused(&paused))?,
        Intent::Resume { id } => report(tracker.resume(id), |resumed| ui::print_resumed(&resumed))?,
        Intent::Stop { id: None } => {
            report(tracker.stop_active(), |task| ui::print_completed("Stopped task", &task))?
        }
        Intent::Stop { id: Some(id) } => report(tracker.stop_paused(id), |task| {
            ui::print_completed("Stopped paused task", &task)
        })?,
        Intent::Complete { id } => {
            report(tracker.complete(id), |task| ui::print_completed("Completed task", &task))?
        }
        Intent::Status => ui::print_status(tracker.status().as_ref()),
        Intent::ViewDay { date } => {
            let date = date.unwrap_or_else(|| tracker.clock().today());
            let view = day_view(tracker.store(), date, tracker.clock().now())?;
            ui::tables::print_day(&view);
        }
        Intent::ViewWeek { date } => {
            let date = date.unwrap_or_else(|| tracker.clock().today());
            match week_range(date) {
                Some(range) => {
                    let summary = week_view(tracker.store(), range)?;
                    ui::tables::print_period("Week summary", &summary, "No data for this week.");
                }
                None => ui::print_error(&format!("Invalid date '{}'. Use YYYY-MM-DD", date)),
            }
        }
        Intent::ViewMonth { month } => {
            let (year, month) = month.unwrap_or_else(|| {
                let today = tracker.clock().today();
                (today.year(), today.month())
            });
            match month_range(year, month) {
                Some(range) => {
                    let summary = month_view(tracker.store(), range)?;
                    let title = format!("Month summary {}-{:02}", year, month);
                    ui::tables::print_period(&title, &summary, "No data for this month.");
                }
                None => ui::print_error("Usage: viewmonth YEAR MONTH"),
            }
        }
        Intent::Paused => ui::tables::print_paused(&tracker.store().list_paused()),
        Intent::Help => ui::print_help(),
        Intent::Exit => return Ok(Flow::Exit),
    }

    Ok(Flow::Continue)
}

/// Print a non-fatal failure and carry on; hand storage failures back
fn report<T>(result: TrackResult<T>, on_success: impl FnOnce(T)) -> Result<(), StoreError> {
    match result {
        Ok(value) => {
            on_success(value);
            Ok(())
        }
        Err(TrackError::Store(e)) => Err(e),
        Err(e) => {
            ui::print_notice(&e.to_string());
            Ok(())
        }
    }
}

/// Prompt for name, category and notes; None if the name is left blank
fn ask_task_details(prompter: &mut dyn Prompter) -> Option<(String, String, String)> {
    let name = prompter.ask("Task name: ")?;
    if name.trim().is_empty() {
        return None;
    }
    let category = prompter.ask("Category: ").unwrap_or_default();
    let notes = prompter.ask("Notes: ").unwrap_or_default();
    Some((name, category, notes))
}
