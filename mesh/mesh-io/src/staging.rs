//! Scoped staging of uploaded mesh files.
//!
//! An upload arrives as a file name plus raw bytes. [`StagingArea`] writes
//! the bytes to a uniquely named temporary file, parses it, and releases the
//! file when the guard goes out of scope, whether parsing succeeded or not.

use std::io::Write;
use std::path::{Path, PathBuf};

use mesh_types::{IndexedMesh, MeshTopology};
use tracing::{debug, info};

use crate::error::{IoError, IoResult};
use crate::stl::load_stl;

/// Default upload limit: 200 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;

/// Limits applied to an upload before it is staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// Largest accepted upload in bytes.
    pub max_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadLimits {
    /// Limits with a custom byte cap.
    #[must_use]
    pub const fn with_max_bytes(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

/// A directory that holds uploads for the duration of one load call.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{StagingArea, UploadLimits};
///
/// let staging = StagingArea::new("temp", UploadLimits::default());
/// let bytes = std::fs::read("character.stl").unwrap();
/// let mesh = staging.load_upload("character.stl", &bytes).unwrap();
/// println!("{} triangles", mesh.faces.len());
/// ```
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
    limits: UploadLimits,
}

impl StagingArea {
    /// Create a staging area rooted at `dir`.
    ///
    /// The directory is created lazily on the first upload.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, limits: UploadLimits) -> Self {
        Self {
            dir: dir.into(),
            limits,
        }
    }

    /// Staging directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Active upload limits.
    #[must_use]
    pub const fn limits(&self) -> UploadLimits {
        self.limits
    }

    /// Create the staging directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_dir(&self) -> IoResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Check an upload against the name and size rules without staging it.
    ///
    /// # Errors
    ///
    /// [`IoError::EmptyInput`], [`IoError::UnsupportedExtension`] or
    /// [`IoError::TooLarge`].
    pub fn validate(&self, file_name: &str, bytes: &[u8]) -> IoResult<()> {
        if bytes.is_empty() {
            return Err(IoError::EmptyInput);
        }

        let is_stl = Path::new(file_name)
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("stl"));
        if !is_stl {
            return Err(IoError::UnsupportedExtension {
                name: file_name.to_string(),
            });
        }

        let size = bytes.len() as u64;
        if size > self.limits.max_bytes {
            return Err(IoError::TooLarge {
                size,
                limit: self.limits.max_bytes,
            });
        }

        Ok(())
    }

    /// Stage an upload, parse it, and release the staged file.
    ///
    /// The temporary file is removed before this returns on every path.
    ///
    /// # Errors
    ///
    /// Any validation error from [`validate`](Self::validate), an
    /// [`IoError::Io`] if staging fails, or any parse error from
    /// [`load_stl`].
    pub fn load_upload(&self, file_name: &str, bytes: &[u8]) -> IoResult<IndexedMesh> {
        self.validate(file_name, bytes)?;
        self.ensure_dir()?;

        let staged = self.stage(bytes)?;
        debug!(
            name = file_name,
            path = %staged.path().display(),
            bytes = bytes.len(),
            "Staged upload"
        );

        let mesh = load_stl(staged.path())?;
        info!(
            name = file_name,
            triangles = mesh.face_count(),
            vertices = mesh.vertex_count(),
            "Loaded mesh"
        );
        Ok(mesh)
    }

    fn stage(&self, bytes: &[u8]) -> IoResult<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".stl")
            .tempfile_in(&self.dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(file)
    }
}
