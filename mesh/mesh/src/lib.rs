//! STL model showcase.
//!
//! This umbrella crate wires the showcase pipeline together and re-exports
//! the crates it is built from:
//!
//! - [`types`] - `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`
//! - [`io`] - STL parsing, writing, and scoped upload staging
//! - [`scene`] - normalization, display options, plotly export
//! - [`project`] - named JSON project records
//!
//! [`Showcase`] runs one upload through loader, normalizer, and scene
//! builder, recovering every failure into [`ViewOutcome::NoModel`].
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh::prelude::*;
//!
//! let showcase = Showcase::new(ShowcaseConfig::default());
//! let bytes = std::fs::read("character.stl").unwrap();
//!
//! if let ViewOutcome::Ready { scene, vertex_count } =
//!     showcase.view_upload("character.stl", &bytes)
//! {
//!     println!("Vertices: {vertex_count}");
//!     Figure::from_scene(&scene).write_html("character.html", "character").unwrap();
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod pipeline;

pub use config::{ConfigError, ConfigResult, ShowcaseConfig};
pub use pipeline::{Showcase, ViewOutcome};

/// Core data structures: `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`.
pub use mesh_types as types;

/// STL loading, writing, and upload staging.
pub use mesh_io as io;

/// Normalization, scene building, and plotly export.
pub use mesh_scene as scene;

/// Project records.
pub use mesh_project as project;

/// Common imports for the showcase.
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    pub use mesh_types::{Aabb, IndexedMesh, MeshBounds, MeshTopology, Triangle, Vertex};

    pub use mesh_io::{StagingArea, StlEncoding, load_stl, parse_stl, save_stl};

    pub use mesh_scene::{DisplayOptions, Figure, SceneDescription, build_scene, normalize};

    pub use mesh_project::{ProjectData, ProjectStore};

    pub use crate::{Showcase, ShowcaseConfig, ViewOutcome};
}
