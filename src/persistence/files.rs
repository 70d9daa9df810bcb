use super::error::{StoreError, StoreResult};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the per-user data directory, under the home directory
pub const DATA_DIR_NAME: &str = ".trackme";

pub const HISTORY_FILE: &str = "trackme.db";
pub const ACTIVE_FILE: &str = "active.json";
pub const PAUSED_FILE: &str = "paused.json";
pub const META_FILE: &str = "meta.json";

/// Per-user data directory, `~/.trackme`
pub fn get_data_dir() -> StoreResult<PathBuf> {
    let home = dirs::home_dir().ok_or(StoreError::Location("home directory"))?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Ensure a directory exists
pub fn ensure_dir(dir: &Path) -> StoreResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
    }
    Ok(())
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> StoreResult<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .ok_or(StoreError::Location("parent directory of a data file"))?;

    // Temp file must live on the same filesystem for the rename to be atomic
    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| StoreError::io(temp_file.path(), e))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| StoreError::io(temp_file.path(), e))?;

    temp_file
        .persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;

    Ok(())
}

/// Read file content, None if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path.as_ref()) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Remove a file; a missing file is not an error
pub fn remove_file<P: AsRef<Path>>(path: P) -> StoreResult<()> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir() {
        let dir = get_data_dir().unwrap();
        assert_eq!(dir.file_name().and_then(|n| n.to_str()), Some(DATA_DIR_NAME));
        assert_eq!(dir.parent(), dirs::home_dir().as_deref());
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a").join(DATA_DIR_NAME);

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "{\"a\": 1}").unwrap();
        atomic_write(&test_file, "{\"a\": 2}").unwrap();

        let read_content = read_file(&test_file).unwrap();
        assert_eq!(read_content.as_deref(), Some("{\"a\": 2}"));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.json");

        assert_eq!(read_file(&test_file).unwrap(), None);
    }

    #[test]
    fn test_remove_file_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("active.json");

        atomic_write(&test_file, "{}").unwrap();
        remove_file(&test_file).unwrap();
        remove_file(&test_file).unwrap();
        assert!(!test_file.exists());
    }
}
