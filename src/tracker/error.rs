use crate::domain::TaskId;
use crate::persistence::StoreError;
use thiserror::Error;

/// Why a lifecycle operation did nothing (or failed)
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("Canceled: empty task name")]
    EmptyName,

    #[error("No active task to pause.")]
    NothingToPause,

    #[error("No active task to stop.")]
    NothingToStop,

    #[error("No paused task with id {0}")]
    PausedNotFound(TaskId),

    #[error("No paused or active task with id {0}")]
    NoSuchTask(TaskId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type TrackResult<T> = Result<T, TrackError>;
