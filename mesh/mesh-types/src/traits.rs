//! Read-only views shared by mesh containers.

use crate::{Aabb, Triangle};

/// Counting and lookup over a vertex buffer plus face buffer.
pub trait MeshTopology {
    /// Number of vertex slots.
    fn vertex_count(&self) -> usize;

    /// Number of triangular faces.
    fn face_count(&self) -> usize;

    /// No vertices or no faces: nothing can be drawn.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Face `face_index` resolved to positions. `None` if the face or any
    /// of its corners is missing.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;
}

/// Axis-aligned extent of a point set.
pub trait MeshBounds {
    /// Box around every vertex; [`Aabb::empty`] when there are none.
    fn bounds(&self) -> Aabb;

    /// Like [`bounds`](Self::bounds), but `None` for an empty box.
    fn bounds_opt(&self) -> Option<Aabb> {
        Some(self.bounds()).filter(|b| !b.is_empty())
    }
}
