//! STL loading for the showcase pipeline.
//!
//! This crate turns raw STL bytes into a triangle-soup
//! [`IndexedMesh`](mesh_types::IndexedMesh):
//!
//! - [`parse_stl`] - binary or ASCII bytes already in memory
//! - [`load_stl`] - a file on disk
//! - [`StagingArea::load_upload`] - an uploaded file, staged to a scoped
//!   temporary file that is removed before the call returns
//!
//! It can also write meshes back out with [`save_stl`] / [`write_stl`].
//!
//! Any failure yields an [`IoError`] and no mesh at all; there is no partial
//! output.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_stl, save_stl, StlEncoding};
//!
//! let mesh = load_stl("model.stl").unwrap();
//! assert_eq!(mesh.vertices.len(), 3 * mesh.faces.len());
//!
//! save_stl(&mesh, "copy.stl", StlEncoding::Ascii).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod staging;
mod stl;

pub use error::{IoError, IoResult};
pub use staging::{DEFAULT_MAX_UPLOAD_BYTES, StagingArea, UploadLimits};
pub use stl::{StlEncoding, detect_encoding, load_stl, parse_stl, save_stl, write_stl};
