use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The two lifecycle states of a task.
///
/// Serialized as `"Pending"` / `"Completed"` — the exact strings stored in
/// the task file, so the variant names double as the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status '{}' (expected Pending or Completed)", self.0)
    }
}

impl std::error::Error for InvalidStatus {}

impl FromStr for Status {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Completed" => Ok(Self::Completed),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// One to-do entry: a description and its completion status.
///
/// Identity is positional — a task is addressed by its index in the store's
/// ordered list, and deletion shifts the identity of everything after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    #[serde(default)]
    pub status: Status,
}

impl Task {
    /// Build a new pending task. The caller validates and trims first.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: Status::Pending,
        }
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, Status::Completed)
    }
}
