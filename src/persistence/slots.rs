use super::error::{StoreError, StoreResult};
use super::files::{atomic_write, read_file, remove_file};
use crate::domain::{ActiveTask, PausedTask};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Outcome of reading a JSON state file
#[derive(Debug, Clone, PartialEq)]
pub enum SlotRead<T> {
    /// No file on disk
    Absent,
    Present(T),
    /// File exists but could not be read or decoded
    Corrupt(String),
}

impl<T> SlotRead<T> {
    /// Collapse to an Option, treating a corrupt file as empty (logged)
    pub fn or_empty(self, what: &str) -> Option<T> {
        match self {
            SlotRead::Present(value) => Some(value),
            SlotRead::Absent => None,
            SlotRead::Corrupt(reason) => {
                log::warn!("Ignoring unreadable {}: {}", what, reason);
                None
            }
        }
    }
}

/// Read and decode a JSON file
pub fn read_slot<T: DeserializeOwned>(path: &Path) -> SlotRead<T> {
    let content = match read_file(path) {
        Ok(Some(content)) => content,
        Ok(None) => return SlotRead::Absent,
        Err(e) => return SlotRead::Corrupt(format!("{}: {}", path.display(), e)),
    };

    match serde_json::from_str(&content) {
        Ok(value) => SlotRead::Present(value),
        Err(e) => SlotRead::Corrupt(format!("{}: {}", path.display(), e)),
    }
}

/// Encode and atomically write a JSON file
pub fn write_slot<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, &json)
}

pub fn read_active(path: &Path) -> SlotRead<ActiveTask> {
    read_slot(path)
}

pub fn write_active(path: &Path, task: &ActiveTask) -> StoreResult<()> {
    write_slot(path, task)
}

pub fn clear_active(path: &Path) -> StoreResult<()> {
    remove_file(path)
}

pub fn read_paused(path: &Path) -> SlotRead<Vec<PausedTask>> {
    read_slot(path)
}

pub fn write_paused(path: &Path, paused: &[PausedTask]) -> StoreResult<()> {
    write_slot(path, &paused)
}
