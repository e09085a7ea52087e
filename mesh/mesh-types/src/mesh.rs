//! Vertex and face buffers.

use crate::{Aabb, MeshBounds, MeshTopology, Triangle, Vertex};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vertex buffer plus face index buffer.
///
/// Each face names three slots of `vertices`. Meshes produced by the STL
/// loader never share a slot between faces (see
/// [`is_triangle_soup`](Self::is_triangle_soup)), but the type itself does
/// not enforce that: hand-built meshes may share or even dangle, and
/// consumers that care check [`first_dangling_index`](Self::first_dangling_index).
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, MeshTopology, Vertex};
///
/// let mesh = IndexedMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex slots.
    pub vertices: Vec<Vertex>,

    /// Faces as triples of slot indices.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// An empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }

    /// An empty mesh with room for the given number of slots and faces.
    #[must_use]
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self::from_parts(Vec::with_capacity(vertices), Vec::with_capacity(faces))
    }

    /// Wrap existing buffers without validating them.
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Flatten a triangle soup into a vertex buffer and face index buffer.
    ///
    /// Triangle `k` owns vertex slots `3k, 3k + 1, 3k + 2` and face
    /// `[3k, 3k + 1, 3k + 2]`, in iteration order.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, Triangle};
    ///
    /// let a = Triangle::from_arrays([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    /// let b = Triangle::from_arrays([0.0; 3], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
    ///
    /// let mesh = IndexedMesh::from_triangles([a, b]);
    /// assert_eq!(mesh.vertices.len(), 6);
    /// assert_eq!(mesh.faces, vec![[0, 1, 2], [3, 4, 5]]);
    /// ```
    #[must_use]
    pub fn from_triangles<I>(triangles: I) -> Self
    where
        I: IntoIterator<Item = Triangle>,
    {
        let triangles = triangles.into_iter();
        let (lower, _) = triangles.size_hint();
        let mut mesh = Self::with_capacity(lower * 3, lower);
        for tri in triangles {
            mesh.push_triangle(&tri, None);
        }
        mesh
    }

    /// Append one triangle with its own three vertex copies.
    ///
    /// `normal` is the facet normal recorded in the source file, if any; it
    /// is attached to all three vertices.
    #[allow(clippy::cast_possible_truncation)]
    // face indices are u32
    pub fn push_triangle(&mut self, triangle: &Triangle, normal: Option<Vector3<f64>>) {
        let base = self.vertices.len() as u32;
        for position in triangle.vertices() {
            let vertex = match normal {
                Some(n) => Vertex::with_normal(position, n),
                None => Vertex::new(position),
            };
            self.vertices.push(vertex);
        }
        self.faces.push([base, base + 1, base + 2]);
    }

    /// Iterate over vertex positions in buffer order.
    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.vertices.iter().map(|v| &v.position)
    }

    /// Iterate over all faces with resolved vertex positions.
    ///
    /// Faces with an out-of-range index are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.faces.len()).filter_map(|i| self.triangle(i))
    }

    /// Componentwise arithmetic mean of all vertex positions.
    ///
    /// Returns `None` when there are no vertices.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, Point3, Triangle};
    ///
    /// let mesh = IndexedMesh::from_triangles([Triangle::from_arrays(
    ///     [0.0, 0.0, 0.0],
    ///     [2.0, 0.0, 0.0],
    ///     [0.0, 2.0, 0.0],
    /// )]);
    ///
    /// let c = mesh.centroid().unwrap();
    /// assert!((c.x - 2.0 / 3.0).abs() < 1e-12);
    /// assert!((c.y - 2.0 / 3.0).abs() < 1e-12);
    /// assert_eq!(c.z, 0.0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    // Precision: vertex counts stay far below 2^52
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .positions()
            .fold(Vector3::zeros(), |acc: Vector3<f64>, p| acc + p.coords);
        Some(Point3::from(sum / self.vertices.len() as f64))
    }

    /// Add `offset` to every position.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }

    /// Multiply every position by `factor`.
    ///
    /// Facet normals are direction-only and are left untouched.
    pub fn scale(&mut self, factor: f64) {
        for vertex in &mut self.vertices {
            vertex.position.coords *= factor;
        }
    }

    /// Check the triangle-soup layout: `3 × faces` vertices and face `k`
    /// equal to `[3k, 3k + 1, 3k + 2]`.
    #[must_use]
    pub fn is_triangle_soup(&self) -> bool {
        self.vertices.len() == self.faces.len() * 3
            && self.faces.iter().enumerate().all(|(k, face)| {
                let base = k * 3;
                face.iter()
                    .zip(base..)
                    .all(|(&idx, expected)| idx as usize == expected)
            })
    }

    /// Index of the first face referencing a missing vertex, with the
    /// offending index.
    #[must_use]
    pub fn first_dangling_index(&self) -> Option<(usize, u32)> {
        let count = self.vertices.len();
        self.faces.iter().enumerate().find_map(|(face, indices)| {
            indices
                .iter()
                .find(|&&i| i as usize >= count)
                .map(|&i| (face, i))
        })
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [i0, i1, i2] = *self.faces.get(face_index)?;
        Some(Triangle::new(
            self.vertices.get(i0 as usize)?.position,
            self.vertices.get(i1 as usize)?.position,
            self.vertices.get(i2 as usize)?.position,
        ))
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> IndexedMesh {
        IndexedMesh::from_triangles([
            Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            Triangle::from_arrays([5.0, 5.0, 5.0], [6.0, 5.0, 5.0], [5.0, 6.0, 5.0]),
        ])
    }

    #[test]
    fn mesh_is_empty() {
        let mesh = IndexedMesh::new();
        assert!(mesh.is_empty());

        let mut mesh2 = IndexedMesh::new();
        mesh2.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        assert!(mesh2.is_empty()); // no faces

        mesh2.faces.push([0, 0, 0]);
        assert!(!mesh2.is_empty());
    }

    #[test]
    fn from_triangles_is_soup() {
        let mesh = two_triangles();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [3, 4, 5]]);
        assert!(mesh.is_triangle_soup());
    }

    #[test]
    fn shared_vertices_are_not_soup() {
        let mut mesh = IndexedMesh::new();
        for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]] {
            mesh.vertices.push(p.into());
        }
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([1, 3, 2]);
        assert!(!mesh.is_triangle_soup());
    }

    #[test]
    fn push_triangle_keeps_normal() {
        let mut mesh = IndexedMesh::new();
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        mesh.push_triangle(&tri, Some(Vector3::new(0.0, 0.0, 2.0)));
        assert!(mesh.vertices.iter().all(|v| v.normal == Some(Vector3::z())));
    }

    #[test]
    fn centroid_is_mean_of_all_slots() {
        let mesh = two_triangles();
        let c = mesh.centroid().unwrap();
        // (0+1+0+5+6+5)/6, (0+0+1+5+5+6)/6, (0+0+0+5+5+5)/6
        assert!((c.x - 17.0 / 6.0).abs() < 1e-12);
        assert!((c.y - 17.0 / 6.0).abs() < 1e-12);
        assert!((c.z - 2.5).abs() < 1e-12);
    }

    #[test]
    fn centroid_of_empty_is_none() {
        assert!(IndexedMesh::new().centroid().is_none());
    }

    #[test]
    fn mesh_bounds() {
        let mesh = two_triangles();
        let bounds = mesh.bounds();
        assert_eq!(bounds.min, Point3::origin());
        assert_eq!(bounds.max, Point3::new(6.0, 6.0, 5.0));
        assert!((bounds.max_extent() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_mesh_bounds() {
        let mesh = IndexedMesh::new();
        assert!(mesh.bounds().is_empty());
        assert!(mesh.bounds_opt().is_none());
    }

    #[test]
    fn translate_and_scale_leave_faces_alone() {
        let mut mesh = two_triangles();
        let faces = mesh.faces.clone();

        mesh.translate(Vector3::new(1.0, 2.0, 3.0));
        mesh.scale(0.5);

        assert_eq!(mesh.faces, faces);
        let p = mesh.vertices[0].position;
        assert!((p.x - 0.5).abs() < f64::EPSILON);
        assert!((p.y - 1.0).abs() < f64::EPSILON);
        assert!((p.z - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn dangling_index_reported() {
        let mut mesh = two_triangles();
        assert!(mesh.first_dangling_index().is_none());
        mesh.faces.push([0, 1, 9]);
        assert_eq!(mesh.first_dangling_index(), Some((2, 9)));
        assert!(mesh.triangle(2).is_none());
        assert_eq!(mesh.triangles().count(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let mesh = two_triangles();
        let json = serde_json::to_string(&mesh).unwrap();
        let back: IndexedMesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mesh);
    }
}
