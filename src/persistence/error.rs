use std::path::PathBuf;
use thiserror::Error;

/// Storage failure. Any write failure is fatal for the current command.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not determine {0}")]
    Location(&'static str),

    #[error("History database (schema v{version}) has no tasks table")]
    MissingTable { version: i32 },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("History database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
