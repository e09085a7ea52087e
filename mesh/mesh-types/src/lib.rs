//! Core mesh types for the STL showcase.
//!
//! This crate provides the foundational types shared by the loader, the
//! normalizer and the scene builder:
//!
//! - [`Vertex`] - A point in 3D space with an optional facet normal
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`IndexedMesh`] - A vertex buffer plus a face index buffer
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Triangle Soup
//!
//! Meshes read from STL files are **triangle soups**: every triangle owns its
//! own three vertex copies and nothing is deduplicated. Triangle `k` of the
//! file lands in vertex slots `3k, 3k + 1, 3k + 2` and its face is exactly
//! `[3k, 3k + 1, 3k + 2]`. See [`IndexedMesh::from_triangles`].
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshTopology, Triangle};
//!
//! let mesh = IndexedMesh::from_triangles([Triangle::from_arrays(
//!     [0.0, 0.0, 0.0],
//!     [2.0, 0.0, 0.0],
//!     [0.0, 2.0, 0.0],
//! )]);
//!
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.faces, vec![[0, 1, 2]]);
//! assert!(mesh.is_triangle_soup());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::IndexedMesh;
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
