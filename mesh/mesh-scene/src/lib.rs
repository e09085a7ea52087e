//! Mesh normalization and renderer-ready scenes.
//!
//! A loaded mesh is recentered on its centroid and scaled so its longest
//! axis spans one unit ([`normalize`]), then packaged with fixed
//! [`DisplayOptions`] into an immutable [`SceneDescription`]
//! ([`build_scene`]). [`Figure`] turns a scene into a plotly `mesh3d`
//! figure for the browser viewer.
//!
//! # Example
//!
//! ```
//! use mesh_scene::{build_scene, DisplayOptions, Figure};
//! use mesh_types::{IndexedMesh, Triangle};
//!
//! let mesh = IndexedMesh::from_triangles([Triangle::from_arrays(
//!     [0.0, 0.0, 0.0],
//!     [2.0, 0.0, 0.0],
//!     [0.0, 2.0, 0.0],
//! )]);
//!
//! let scene = build_scene(&mesh, &DisplayOptions::default()).unwrap().unwrap();
//! assert_eq!(scene.max_range(), 2.0);
//!
//! let json = Figure::from_scene(&scene).to_json().unwrap();
//! assert!(json.contains("\"mesh3d\""));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod display;
mod error;
mod normalize;
mod plotly;
mod scene;

pub use display::{AspectMode, Camera, DisplayOptions, Margin};
pub use error::{SceneError, SceneResult};
pub use normalize::{Normalized, normalize};
pub use plotly::{
    Axis, CameraLayout, Figure, Layout, MarginLayout, Mesh3dTrace, PLOTLY_CDN, SceneLayout, Xyz,
};
pub use scene::{SceneDescription, build_scene};
