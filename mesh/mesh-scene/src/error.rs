//! Error types for scene building and export.

use thiserror::Error;

/// Errors that can occur while building or exporting a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The mesh has no vertices or no faces.
    #[error("mesh has no vertices or no faces")]
    EmptyInput,

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceOutOfRange {
        /// Offending face.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing an export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for scene operations.
pub type SceneResult<T> = std::result::Result<T, SceneError>;
