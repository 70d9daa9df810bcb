use crate::domain::TaskId;
use crate::report::{month_range, week_range};
use chrono::NaiveDate;
use thiserror::Error;

/// A parsed user command, independent of where it was typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Start a task; prompt for details when no name is given
    Start { name: Option<String> },
    Pause,
    Resume { id: TaskId },
    /// Stop the active task, or a paused one by id
    Stop { id: Option<TaskId> },
    /// Complete the active task, or a paused/active one by id
    Complete { id: Option<TaskId> },
    Status,
    ViewDay { date: Option<NaiveDate> },
    ViewWeek { date: Option<NaiveDate> },
    /// Year and month, validated
    ViewMonth { month: Option<(i32, u32)> },
    Paused,
    Help,
    Exit,
}

/// Malformed input. Reported in one line; nothing is changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Unknown command '{0}'. Type help for commands.")]
    UnknownCommand(String),

    #[error("ID must be a number (got '{0}')")]
    InvalidId(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Usage: viewmonth YEAR MONTH")]
    InvalidMonth,
}

impl Intent {
    /// Parse one line of interactive input; None for a blank line
    pub fn parse_line(line: &str) -> Result<Option<Self>, InputError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        Self::parse_words(&words)
    }

    /// Parse a command and its arguments.
    ///
    /// Both the interactive prompt and command-line invocations go through
    /// here, so the two surfaces accept exactly the same grammar.
    pub fn parse_words<S: AsRef<str>>(words: &[S]) -> Result<Option<Self>, InputError> {
        let (command, args) = match words.split_first() {
            Some((command, args)) => (command.as_ref().to_lowercase(), args),
            None => return Ok(None),
        };
        let arg = move |index: usize| args.get(index).map(|a| a.as_ref());

        let intent = match command.as_str() {
            "start" => {
                let name = args.iter().map(|a| a.as_ref()).collect::<Vec<&str>>().join(" ");
                let name = name.trim();
                Intent::Start {
                    name: if name.is_empty() { None } else { Some(name.to_string()) },
                }
            }
            "pause" => Intent::Pause,
            "resume" => match arg(0) {
                Some(raw) => Intent::Resume { id: parse_id(raw)? },
                None => return Err(InputError::MissingArgument("resume <id>")),
            },
            "stop" => Intent::Stop {
                id: arg(0).map(parse_id).transpose()?,
            },
            "complete" => Intent::Complete {
                id: arg(0).map(parse_id).transpose()?,
            },
            "status" => Intent::Status,
            "viewday" => Intent::ViewDay {
                date: arg(0).map(parse_date).transpose()?,
            },
            "viewweek" => Intent::ViewWeek {
                date: arg(0).map(parse_week_date).transpose()?,
            },
            "viewmonth" => Intent::ViewMonth {
                month: match (arg(0), arg(1)) {
                    (None, _) => None,
                    (Some(year), Some(month)) => Some(parse_month(year, month)?),
                    (Some(_), None) => return Err(InputError::InvalidMonth),
                },
            },
            "paused" => Intent::Paused,
            "help" => Intent::Help,
            "exit" | "quit" => Intent::Exit,
            other => return Err(InputError::UnknownCommand(other.to_string())),
        };

        Ok(Some(intent))
    }
}

/// Task ids are positive integers
pub fn parse_id(raw: &str) -> Result<TaskId, InputError> {
    match raw.trim().parse::<TaskId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(InputError::InvalidId(raw.to_string())),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| InputError::InvalidDate(raw.to_string()))
}

/// A date whose whole Monday-Sunday week is representable
fn parse_week_date(raw: &str) -> Result<NaiveDate, InputError> {
    let date = parse_date(raw)?;
    week_range(date).ok_or_else(|| InputError::InvalidDate(raw.to_string()))?;
    Ok(date)
}

fn parse_month(year: &str, month: &str) -> Result<(i32, u32), InputError> {
    let year: i32 = year.trim().parse().map_err(|_| InputError::InvalidMonth)?;
    let month: u32 = month.trim().parse().map_err(|_| InputError::InvalidMonth)?;
    month_range(year, month).ok_or(InputError::InvalidMonth)?;
    Ok((year, month))
}
