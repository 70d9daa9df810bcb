use super::enums::TaskStatus;
use crate::clock::{elapsed_seconds, serde_timestamp};
use chrono::{DateTime, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Task ids are allocated by the store and never reused
pub type TaskId = i64;

/// Fields shared by a task in every state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    pub id: TaskId,
    pub task_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Calendar date the task was first started; fixed for its lifetime
    pub date: NaiveDate,
}

/// User input for a new task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub task_name: String,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl NewTask {
    /// Build a new task request; returns None when the name is blank
    pub fn new(task_name: &str, category: &str, notes: &str) -> Option<Self> {
        let task_name = task_name.trim();
        if task_name.is_empty() {
            return None;
        }
        Some(Self {
            task_name: task_name.to_string(),
            category: non_empty(category),
            notes: non_empty(notes),
        })
    }

    #[cfg(test)]
    pub fn named(task_name: &str) -> Option<Self> {
        Self::new(task_name, "", "")
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// The task currently accruing time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTask {
    #[serde(flatten)]
    pub info: TaskInfo,
    /// Real start, or `resumed_at - elapsed` after a resume
    #[serde(with = "serde_timestamp")]
    pub start_time: DateTime<Local>,
}

impl ActiveTask {
    pub fn begin(id: TaskId, task: NewTask, now: DateTime<Local>) -> Self {
        Self {
            info: TaskInfo {
                id,
                task_name: task.task_name,
                category: task.category,
                notes: task.notes,
                date: now.date_naive(),
            },
            start_time: now,
        }
    }

    pub fn id(&self) -> TaskId {
        self.info.id
    }

    /// Seconds accrued so far
    pub fn elapsed_at(&self, now: DateTime<Local>) -> i64 {
        elapsed_seconds(self.start_time, now)
    }

    /// Freeze the accrued time
    pub fn pause(self, now: DateTime<Local>) -> PausedTask {
        let elapsed = self.elapsed_at(now);
        PausedTask {
            info: self.info,
            elapsed,
            start_time: Some(self.start_time),
        }
    }

    /// Finalize into an immutable history record
    pub fn complete(self, now: DateTime<Local>) -> CompletedTask {
        let duration = self.elapsed_at(now);
        CompletedTask {
            info: self.info,
            start_time: self.start_time,
            end_time: now,
            duration,
            status: TaskStatus::Completed,
        }
    }
}

/// A task whose elapsed time is frozen until it is resumed or completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PausedTask {
    #[serde(flatten)]
    pub info: TaskInfo,
    /// Seconds accrued before the pause
    #[serde(default)]
    pub elapsed: i64,
    /// Start of the interval that was paused, kept for chronological listing
    #[serde(
        default,
        with = "serde_timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<DateTime<Local>>,
}

impl PausedTask {
    pub fn id(&self) -> TaskId {
        self.info.id
    }

    /// Back-date the start so the resumed task reads as if it never stopped
    pub fn resume(self, now: DateTime<Local>) -> ActiveTask {
        ActiveTask {
            start_time: now - Duration::seconds(self.elapsed),
            info: self.info,
        }
    }

    /// Complete without resuming; no time accrues while paused
    pub fn complete(self, now: DateTime<Local>) -> CompletedTask {
        CompletedTask {
            start_time: now - Duration::seconds(self.elapsed),
            end_time: now,
            duration: self.elapsed,
            info: self.info,
            status: TaskStatus::Completed,
        }
    }
}

/// A finished task as stored in history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTask {
    pub info: TaskInfo,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    /// Final seconds
    pub duration: i64,
    pub status: TaskStatus,
}

impl CompletedTask {
    pub fn id(&self) -> TaskId {
        self.info.id
    }
}
