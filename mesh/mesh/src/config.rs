//! Showcase configuration.

use std::path::{Path, PathBuf};

use mesh_io::{DEFAULT_MAX_UPLOAD_BYTES, UploadLimits};
use mesh_scene::DisplayOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where the showcase keeps its files and how it draws models.
///
/// Every key is optional in TOML.
///
/// # Example
///
/// ```
/// use mesh::ShowcaseConfig;
///
/// let config = ShowcaseConfig::from_toml_str(
///     r#"
///     staging_dir = "/tmp/showcase"
///
///     [display]
///     color = "salmon"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.projects_dir.to_str(), Some("projects"));
/// assert_eq!(config.display.color, "salmon");
/// assert_eq!(config.display.opacity, 0.8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Directory for staged uploads.
    pub staging_dir: PathBuf,
    /// Directory for saved project records.
    pub projects_dir: PathBuf,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
    /// Presentation of loaded models.
    pub display: DisplayOptions,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from("temp"),
            projects_dir: PathBuf::from("projects"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            display: DisplayOptions::default(),
        }
    }
}

impl ShowcaseConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the document is malformed.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Upload limits derived from this config.
    #[must_use]
    pub const fn upload_limits(&self) -> UploadLimits {
        UploadLimits::with_max_bytes(self.max_upload_bytes)
    }
}
