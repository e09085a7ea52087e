//! Error types for mesh loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while loading or staging a mesh.
///
/// Every variant means "no mesh": loaders never hand back partial buffers.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The upload carried no bytes.
    #[error("empty input: no bytes to parse")]
    EmptyInput,

    /// The upload's file name does not name an STL file.
    #[error("unsupported file type: {name} (expected .stl)")]
    UnsupportedExtension {
        /// The offending file name.
        name: String,
    },

    /// The upload exceeds the configured size limit.
    #[error("upload is {size} bytes, limit is {limit} bytes")]
    TooLarge {
        /// Size of the rejected upload.
        size: u64,
        /// Configured limit.
        limit: u64,
    },

    /// Binary STL shorter than its fixed header.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual number of bytes available.
        got: usize,
    },

    /// Binary STL ends before the declared number of triangles.
    #[error("truncated STL: header declares {declared} triangles ({expected} bytes), got {got} bytes")]
    Truncated {
        /// Triangle count from the header.
        declared: u32,
        /// Byte length the header implies.
        expected: u64,
        /// Actual byte length.
        got: u64,
    },

    /// Invalid file content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// The file parsed but contains no triangles.
    #[error("mesh contains no triangles")]
    NoTriangles,

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error in an ASCII STL.
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Float parsing error in an ASCII STL.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Create an `InvalidContent` error pointing at a 1-based line number.
    #[must_use]
    pub fn invalid_line(line: usize, message: impl std::fmt::Display) -> Self {
        Self::InvalidContent {
            message: format!("line {line}: {message}"),
        }
    }
}
