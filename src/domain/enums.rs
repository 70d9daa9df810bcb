use serde::{Deserialize, Serialize};

/// Lifecycle status of a tracked task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Paused,
    Completed,
}

impl TaskStatus {
    /// Parse a stored status string. Rows written before the status column
    /// existed carry NULL or "", which count as completed.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "active" => Self::Active,
            "paused" => Self::Paused,
            _ => Self::Completed,
        }
    }

    /// Convert status to its stored tag
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    /// Display name for tables
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Paused => "Paused",
            Self::Completed => "Completed",
        }
    }
}
