//! Typed error definitions for versioned_fs.
//! Provides a small set of well-known failure modes for better logs and tests.
//! Facade operations return `anyhow::Result`; these can be recovered with
//! `err.downcast_ref::<FsError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("Source path not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("No free name after {attempts} renaming attempts; last candidate was {target}")]
    NamingExhausted { target: PathBuf, attempts: u64 },

    #[error("Permission denied on {path}: {context}")]
    PermissionDenied { path: PathBuf, context: String },

    #[error("Insufficient disk space for destination {dest}: need {required} bytes, have {available} bytes")]
    InsufficientSpace {
        required: u64,
        available: u64,
        dest: PathBuf,
    },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Unknown naming option: '{0}'")]
    InvalidOption(String),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl FsError {
    /// Stable numeric code for structured logs and exit statuses.
    pub fn code(&self) -> i32 {
        match self {
            FsError::SourceNotFound(_) => 2,
            FsError::NamingExhausted { .. } => 3,
            FsError::PermissionDenied { .. } => 4,
            FsError::InsufficientSpace { .. } => 5,
            FsError::NotADirectory(_) => 6,
            FsError::InvalidOption(_) => 7,
            FsError::Interrupted => 130,
        }
    }

    /// Short snake_case tag used as the `kind` field in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FsError::SourceNotFound(_) => "source_not_found",
            FsError::NamingExhausted { .. } => "naming_exhausted",
            FsError::PermissionDenied { .. } => "permission_denied",
            FsError::InsufficientSpace { .. } => "insufficient_space",
            FsError::NotADirectory(_) => "not_a_directory",
            FsError::InvalidOption(_) => "invalid_option",
            FsError::Interrupted => "interrupted",
        }
    }
}
