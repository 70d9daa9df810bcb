use crate::domain::TaskStatus;
use crossterm::style::{StyledContent, Stylize};

/// Task started or completed
pub fn success_style(text: String) -> StyledContent<String> {
    text.green()
}

/// Task paused (manually or automatically)
pub fn paused_style(text: String) -> StyledContent<String> {
    text.yellow()
}

/// Task resumed
pub fn resumed_style(text: String) -> StyledContent<String> {
    text.blue()
}

/// Neutral information such as the status line
pub fn info_style(text: String) -> StyledContent<String> {
    text.cyan()
}

/// Rejected commands and failures
pub fn error_style(text: String) -> StyledContent<String> {
    text.red()
}

/// Table and section headings
pub fn title_style(text: String) -> StyledContent<String> {
    text.cyan().bold()
}

pub fn hint_style(text: String) -> StyledContent<String> {
    text.dark_grey()
}

/// prettytable style string for a status cell
pub fn status_cell_style(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Active => "Fgb",
        TaskStatus::Paused => "Fy",
        TaskStatus::Completed => "Fb",
    }
}
