//! Upload → load → normalize → scene.

use std::path::Path;

use mesh_io::{IoError, IoResult, StagingArea};
use mesh_project::{ProjectResult, ProjectStore};
use mesh_scene::{DisplayOptions, SceneDescription, build_scene};
use mesh_types::MeshTopology;
use tracing::{info, warn};

use crate::config::ShowcaseConfig;

/// Result of viewing one upload.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome {
    /// A scene is ready to draw.
    Ready {
        /// The normalized scene.
        scene: SceneDescription,
        /// Number of vertex slots, shown as "Vertices: N".
        vertex_count: usize,
    },
    /// Nothing is drawn.
    NoModel {
        /// Why loading stopped.
        reason: String,
    },
}

impl ViewOutcome {
    fn no_model(reason: impl ToString) -> Self {
        Self::NoModel {
            reason: reason.to_string(),
        }
    }

    /// The scene, if one was built.
    #[must_use]
    pub const fn scene(&self) -> Option<&SceneDescription> {
        match self {
            Self::Ready { scene, .. } => Some(scene),
            Self::NoModel { .. } => None,
        }
    }

    /// True when a scene was built.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// The showcase pipeline.
///
/// Holds no per-upload state: every call to [`view_upload`](Self::view_upload)
/// is independent.
///
/// # Example
///
/// ```no_run
/// use mesh::{Showcase, ShowcaseConfig, ViewOutcome};
///
/// let showcase = Showcase::new(ShowcaseConfig::default());
/// showcase.ensure_directories().unwrap();
///
/// match showcase.view_path("character.stl") {
///     ViewOutcome::Ready { vertex_count, .. } => println!("Vertices: {vertex_count}"),
///     ViewOutcome::NoModel { reason } => println!("no model: {reason}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Showcase {
    staging: StagingArea,
    config: ShowcaseConfig,
}

impl Showcase {
    /// Build the pipeline from a config.
    #[must_use]
    pub fn new(config: ShowcaseConfig) -> Self {
        Self {
            staging: StagingArea::new(config.staging_dir.clone(), config.upload_limits()),
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    /// Upload staging area.
    #[must_use]
    pub const fn staging(&self) -> &StagingArea {
        &self.staging
    }

    /// Display options applied to every scene.
    #[must_use]
    pub const fn display(&self) -> &DisplayOptions {
        &self.config.display
    }

    /// Create the staging and projects directories.
    ///
    /// # Errors
    ///
    /// Returns an error if either directory cannot be created.
    pub fn ensure_directories(&self) -> IoResult<()> {
        self.staging.ensure_dir()?;
        std::fs::create_dir_all(&self.config.projects_dir)?;
        Ok(())
    }

    /// Open the project store.
    ///
    /// # Errors
    ///
    /// Returns an error if the projects directory cannot be created.
    pub fn projects(&self) -> ProjectResult<ProjectStore> {
        ProjectStore::open(self.config.projects_dir.clone())
    }

    /// Load, normalize, and package an uploaded file.
    ///
    /// Never fails: any load or scene error is logged and reported as
    /// [`ViewOutcome::NoModel`].
    pub fn view_upload(&self, file_name: &str, bytes: &[u8]) -> ViewOutcome {
        let mesh = match self.staging.load_upload(file_name, bytes) {
            Ok(mesh) => mesh,
            Err(e) => {
                warn!(name = file_name, error = %e, "Failed to load mesh");
                return ViewOutcome::no_model(e);
            }
        };

        let vertex_count = mesh.vertex_count();
        match build_scene(&mesh, &self.config.display) {
            Ok(Some(scene)) => {
                info!(name = file_name, vertices = vertex_count, "Scene ready");
                ViewOutcome::Ready {
                    scene,
                    vertex_count,
                }
            }
            Ok(None) => {
                warn!(name = file_name, "Mesh is empty");
                ViewOutcome::no_model("mesh is empty")
            }
            Err(e) => {
                warn!(name = file_name, error = %e, "Failed to build scene");
                ViewOutcome::no_model(e)
            }
        }
    }

    /// Read a file from disk and view it as an upload.
    ///
    /// Files over the upload limit are rejected from their metadata, before
    /// any byte is read.
    pub fn view_path<P: AsRef<Path>>(&self, path: P) -> ViewOutcome {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let limit = self.staging.limits().max_bytes;
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > limit => {
                let err = IoError::TooLarge {
                    size: meta.len(),
                    limit,
                };
                warn!(path = %path.display(), error = %err, "Refusing oversized file");
                return ViewOutcome::no_model(err);
            }
            Ok(_) => {}
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to stat file");
                return ViewOutcome::no_model(format!("{}: {e}", path.display()));
            }
        }

        match std::fs::read(path) {
            Ok(bytes) => self.view_upload(&file_name, &bytes),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read file");
                ViewOutcome::no_model(format!("{}: {e}", path.display()))
            }
        }
    }
}
