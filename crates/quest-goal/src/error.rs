// error.rs — Error types for goal tracking and persistence.

use thiserror::Error;

/// Errors that can occur while creating goals, recording events, or
/// moving quest state to and from storage.
///
/// Every variant is recoverable: the manager's in-memory state is never
/// left half-modified when one of these is returned.
#[derive(Debug, Error)]
pub enum GoalError {
    /// Bad arguments when constructing a goal.
    #[error("invalid goal: {0}")]
    Validation(String),

    /// A goal index outside `[0, len)`.
    #[error("goal index {index} is out of range ({len} goal(s))")]
    OutOfRange { index: i64, len: usize },

    /// The save file to load does not exist.
    #[error("save file not found: {path}")]
    NotFound { path: String },

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// A malformed record in a save file. `line` is 1-based.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Failed to serialize/deserialize an activity event.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The project config file is not valid TOML for [`crate::QuestConfig`].
    #[error("invalid config at {path}: {reason}")]
    Config { path: String, reason: String },
}

impl GoalError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        GoalError::Parse {
            line,
            reason: reason.into(),
        }
    }
}
