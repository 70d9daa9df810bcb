use super::styles::{hint_style, status_cell_style, title_style};
use crate::clock::format_seconds;
use crate::domain::PausedTask;
use crate::report::{DayView, PeriodSummary};
use chrono::{DateTime, Local};
use prettytable::{format, row, Cell, Row, Table};

/// Start/end columns show only the time of day
fn time_of_day(time: Option<DateTime<Local>>) -> String {
    time.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table
}

pub fn day_table(view: &DayView) -> Table {
    let mut table = new_table();
    table.set_titles(row!["ID", "Task", "Category", "Status", "Start", "End", "Duration", "Notes"]);

    for task in &view.rows {
        table.add_row(Row::new(vec![
            Cell::new(&task.id.to_string()).style_spec("r"),
            Cell::new(&task.task_name),
            Cell::new(task.category.as_deref().unwrap_or("")),
            Cell::new(task.status.label()).style_spec(status_cell_style(task.status)),
            Cell::new(&time_of_day(task.start_time)),
            Cell::new(&time_of_day(task.end_time)),
            Cell::new(&format_seconds(task.duration)),
            Cell::new(task.notes.as_deref().unwrap_or("")),
        ]));
    }

    table
}

pub fn paused_table(paused: &[PausedTask]) -> Table {
    let mut table = new_table();
    table.set_titles(row!["ID", "Task", "Category", "Elapsed", "Notes"]);

    for task in paused {
        table.add_row(Row::new(vec![
            Cell::new(&task.id().to_string()).style_spec("r"),
            Cell::new(&task.info.task_name),
            Cell::new(task.info.category.as_deref().unwrap_or("")),
            Cell::new(&format_seconds(task.elapsed)),
            Cell::new(task.info.notes.as_deref().unwrap_or("")),
        ]));
    }

    table
}

/// One row per date with completed work
pub fn period_table(summary: &PeriodSummary) -> Table {
    let mut table = new_table();
    table.set_titles(row!["Date", r->"Total (seconds)", "Duration"]);

    for (date, seconds) in &summary.days {
        table.add_row(Row::new(vec![
            Cell::new(&date.to_string()),
            Cell::new(&seconds.to_string()).style_spec("r"),
            Cell::new(&format_seconds(*seconds)),
        ]));
    }

    table
}

pub fn print_day(view: &DayView) {
    println!("{}", title_style(format!("Tasks for {}", view.date)));
    if view.rows.is_empty() {
        println!("{}", hint_style("No tasks for this day.".to_string()));
    } else {
        day_table(view).printstd();
    }
    println!("{}", title_style(format!("Total: {}", format_seconds(view.total))));
}

pub fn print_paused(paused: &[PausedTask]) {
    if paused.is_empty() {
        println!("No paused tasks.");
        return;
    }
    println!("{}", title_style("Paused Tasks".to_string()));
    paused_table(paused).printstd();
}

pub fn print_period(title: &str, summary: &PeriodSummary, empty_message: &str) {
    if summary.is_empty() {
        println!("{}", empty_message);
        return;
    }
    println!("{}", title_style(title.to_string()));
    period_table(summary).printstd();
    println!("{}", title_style(format!("Total: {}", format_seconds(summary.total))));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskInfo, TaskStatus};
    use crate::report::DayRow;
    use chrono::{NaiveDate, TimeZone};

    fn may_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_day_table_rows() {
        let start = Local.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let view = DayView {
            date: may_10(),
            rows: vec![DayRow {
                id: 3,
                task_name: "write report".to_string(),
                category: Some("work".to_string()),
                notes: None,
                status: TaskStatus::Completed,
                start_time: Some(start),
                end_time: Some(start + chrono::Duration::seconds(125)),
                duration: 125,
            }],
            total: 125,
        };

        let rendered = day_table(&view).to_string();
        assert!(rendered.contains("write report"));
        assert!(rendered.contains("09:00:00"));
        assert!(rendered.contains("09:02:05"));
        assert!(rendered.contains("2m 5s"));
        assert!(rendered.contains("Completed"));
    }

    #[test]
    fn test_paused_table_rows() {
        let paused = PausedTask {
            info: TaskInfo {
                id: 7,
                task_name: "email".to_string(),
                category: None,
                notes: Some("inbox zero".to_string()),
                date: may_10(),
            },
            elapsed: 3725,
            start_time: None,
        };

        let rendered = paused_table(&[paused]).to_string();
        assert!(rendered.contains("email"));
        assert!(rendered.contains("1h 2m"));
        assert!(rendered.contains("inbox zero"));
    }

    #[test]
    fn test_period_table_rows() {
        let summary = PeriodSummary {
            start: may_10(),
            end: may_10(),
            days: vec![(may_10(), 300)],
            total: 300,
        };

        let rendered = period_table(&summary).to_string();
        assert!(rendered.contains("2024-05-10"));
        assert!(rendered.contains("300"));
        assert!(rendered.contains("5m"));
    }
}
