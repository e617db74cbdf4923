use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`crate::store::TaskStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task description is empty")]
    EmptyDescription,

    #[error("no task at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode task list: {0}")]
    EncodeFailed(#[from] serde_json::Error),
}

impl StoreError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyDescription => ErrorCode::EmptyDescription,
            Self::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
            Self::WriteFailed { .. } => ErrorCode::TaskFileWriteFailed,
            Self::EncodeFailed(_) => ErrorCode::TaskFileEncodeFailed,
        }
    }
}

/// Machine-readable error codes for status-line and log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    EmptyDescription,
    IndexOutOfRange,
    TaskFileWriteFailed,
    TaskFileEncodeFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::EmptyDescription => "E2001",
            Self::IndexOutOfRange => "E2002",
            Self::TaskFileWriteFailed => "E5001",
            Self::TaskFileEncodeFailed => "E5002",
        }
    }

    /// Short human-facing summary for logs and the status bar.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::EmptyDescription => "Task description is empty",
            Self::IndexOutOfRange => "No task at that position",
            Self::TaskFileWriteFailed => "Task file write failed",
            Self::TaskFileEncodeFailed => "Task file encode failed",
        }
    }

    /// Optional remediation hint that can be surfaced to the user.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in slate/config.toml and retry."),
            Self::EmptyDescription => Some("Type a task description before adding."),
            Self::IndexOutOfRange => None,
            Self::TaskFileWriteFailed => Some("Check disk space and write permissions."),
            Self::TaskFileEncodeFailed => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
