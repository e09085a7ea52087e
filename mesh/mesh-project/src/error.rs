//! Error types for project persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Errors that can occur while saving or loading a project record.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The project name is empty after trimming.
    #[error("project name is required")]
    MissingName,

    /// The project name would escape the projects directory.
    #[error("invalid project name: {name}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// No record exists for the name.
    #[error("project not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The temporary file could not be moved into place.
    #[error("failed to persist {}: {source}", path.display())]
    Persist {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

impl ProjectError {
    /// Creates an invalid name error.
    #[must_use]
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }
}
