use super::error::{StoreError, StoreResult};
use super::files::{atomic_write, read_file};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// App metadata stored in meta.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Next task id to hand out; required, a file without it is corrupt
    pub next_id: i64,
}

/// Load app metadata from meta.json.
///
/// `None` when the file is missing or can't be decoded; the caller
/// decides how to recover the counter.
pub fn load_metadata<P: AsRef<Path>>(path: P) -> Option<AppMetadata> {
    let path = path.as_ref();

    let content = match read_file(path) {
        Ok(Some(content)) => content,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Unreadable metadata {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<AppMetadata>(&content) {
        Ok(metadata) if metadata.next_id >= 1 => Some(metadata),
        Ok(metadata) => {
            log::warn!("Ignoring invalid next_id {} in {}", metadata.next_id, path.display());
            None
        }
        Err(e) => {
            log::warn!("Corrupt metadata {}: {}", path.display(), e);
            None
        }
    }
}

/// Save app metadata to meta.json file
pub fn save_metadata<P: AsRef<Path>>(path: P, metadata: &AppMetadata) -> StoreResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(metadata).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, &json)
}
