//! Error types for the tmps record store.

use std::path::PathBuf;

/// Broad classification of a [`TmpsError`].
///
/// Callers that only need to know *what kind* of failure happened (the CLI,
/// tests) match on this instead of on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong combination of payload and primary key for the chosen action.
    ArgumentShape,
    /// Payload or key failed validation.
    Validation,
    /// Record exists when it must not, or is missing when it must exist.
    Conflict,
    /// Unexpected filesystem or serialization failure.
    Io,
}

/// Error type with contextual variants.
///
/// All variants include relevant context (path, operation) where applicable.
/// Uses `#[non_exhaustive]` for forward compatibility.
///
/// # Examples
///
/// ```rust
/// use tmps::{ErrorKind, TmpsError};
/// use std::path::PathBuf;
///
/// let err = TmpsError::NotFound { path: PathBuf::from("/tmp/tmps/dev/Maurice") };
/// assert_eq!(err.to_string(), "non existing file /tmp/tmps/dev/Maurice");
/// assert_eq!(err.kind(), ErrorKind::Conflict);
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TmpsError {
    // Argument shape
    /// The payload/key combination does not fit the action.
    #[error("Args check: {action} method: {reason}")]
    ArgumentShape {
        /// The action being checked.
        action: &'static str,
        /// Every violated rule, joined.
        reason: String,
    },

    // Payload validation
    /// The payload is not valid JSON or lacks a required key.
    #[error("json_read: malformed json: {0}")]
    MalformedJson(String),

    /// The environment is not part of the configured set.
    #[error("unknown environment {0}")]
    UnknownEnvironment(String),

    /// The payload targets another environment than the session.
    #[error("json_read: env {expected} different from json env {found}")]
    EnvMismatch {
        /// The environment of the session.
        expected: String,
        /// The environment declared in the payload.
        found: String,
    },

    /// The record name is not made of word characters.
    #[error("json_read: name is not \\w+ : {0}")]
    InvalidName(String),

    /// The mode does not match `0[267][1-7]{2}`.
    #[error("json_read: mode is not 0[267][1-7]{{2}} : {0}")]
    InvalidMode(String),

    /// The primary key is not a single path component.
    #[error("invalid primary key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The primary key and the payload name disagree.
    #[error("put: pk {pk} different from name in json: {name}")]
    KeyMismatch {
        /// The primary key argument.
        pk: String,
        /// The name in the payload.
        name: String,
    },

    // State conflicts
    /// Record already exists when it shouldn't.
    #[error("{operation}: file still exists {path}")]
    AlreadyExists {
        /// The path that already exists.
        path: PathBuf,
        /// The operation that failed.
        operation: &'static str,
    },

    /// Record or directory does not exist.
    #[error("non existing file {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    // Filesystem
    /// Expected a directory but found something else.
    #[error("{path}: no such dir")]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// Permission denied for operation.
    #[error("{operation}: permission denied: {path}")]
    PermissionDenied {
        /// The path where permission was denied.
        path: PathBuf,
        /// The operation that was denied.
        operation: &'static str,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl TmpsError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TmpsError::ArgumentShape { .. } => ErrorKind::ArgumentShape,
            TmpsError::MalformedJson(_)
            | TmpsError::UnknownEnvironment(_)
            | TmpsError::EnvMismatch { .. }
            | TmpsError::InvalidName(_)
            | TmpsError::InvalidMode(_)
            | TmpsError::InvalidKey { .. }
            | TmpsError::KeyMismatch { .. } => ErrorKind::Validation,
            TmpsError::AlreadyExists { .. } | TmpsError::NotFound { .. } => ErrorKind::Conflict,
            TmpsError::NotADirectory { .. }
            | TmpsError::PermissionDenied { .. }
            | TmpsError::Serialization(_)
            | TmpsError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Build an error from an I/O failure, keeping the path and operation.
    pub(crate) fn from_io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        error: std::io::Error,
    ) -> Self {
        let path = path.into();
        match error.kind() {
            std::io::ErrorKind::NotFound => TmpsError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => TmpsError::PermissionDenied { path, operation },
            std::io::ErrorKind::AlreadyExists => TmpsError::AlreadyExists { path, operation },
            _ => TmpsError::Io {
                operation,
                path,
                source: error,
            },
        }
    }
}

impl From<serde_json::Error> for TmpsError {
    fn from(error: serde_json::Error) -> Self {
        TmpsError::Serialization(error.to_string())
    }
}
