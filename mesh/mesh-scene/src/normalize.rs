//! Centering and unit-scaling of a mesh.

use mesh_types::{IndexedMesh, MeshBounds, MeshTopology, Point3};
use tracing::debug;

/// A mesh recentered on its centroid and scaled so its longest axis spans
/// one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    mesh: IndexedMesh,
    centroid: Point3<f64>,
    max_range: f64,
}

impl Normalized {
    /// The normalized mesh. Faces are identical to the input's.
    #[must_use]
    pub const fn mesh(&self) -> &IndexedMesh {
        &self.mesh
    }

    /// Consume and return the normalized mesh.
    #[must_use]
    pub fn into_mesh(self) -> IndexedMesh {
        self.mesh
    }

    /// Centroid of the input mesh (mean of all vertex slots).
    #[must_use]
    pub const fn centroid(&self) -> Point3<f64> {
        self.centroid
    }

    /// Largest per-axis extent of the recentered input, before scaling.
    #[must_use]
    pub const fn max_range(&self) -> f64 {
        self.max_range
    }

    /// True when every vertex coincided, so no scaling was applied.
    #[must_use]
    #[allow(clippy::float_cmp)] // exact zero is the only case that skips scaling
    pub fn is_degenerate(&self) -> bool {
        self.max_range == 0.0
    }
}

/// Recenter a mesh at the origin and scale its longest axis to 1.0.
///
/// 1. centroid = componentwise mean of all vertices
/// 2. every vertex -= centroid
/// 3. `max_range` = largest per-axis peak-to-peak extent, measured after step 2
/// 4. if `max_range` is exactly zero the mesh stays centered but unscaled
/// 5. otherwise every coordinate is divided by `max_range`
///
/// Faces and winding are copied unchanged. Returns `None` when the mesh has
/// no vertices or no faces.
///
/// # Example
///
/// ```
/// use mesh_scene::normalize;
/// use mesh_types::{IndexedMesh, Triangle};
///
/// let mesh = IndexedMesh::from_triangles([Triangle::from_arrays(
///     [0.0, 0.0, 0.0],
///     [2.0, 0.0, 0.0],
///     [0.0, 2.0, 0.0],
/// )]);
///
/// let n = normalize(&mesh).unwrap();
/// assert_eq!(n.max_range(), 2.0);
/// assert!((n.mesh().vertices[1].position.x - 2.0 / 3.0).abs() < 1e-12);
/// ```
#[must_use]
#[allow(clippy::float_cmp)] // exact zero is the only case that skips scaling
pub fn normalize(mesh: &IndexedMesh) -> Option<Normalized> {
    if mesh.is_empty() {
        debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "Nothing to normalize"
        );
        return None;
    }

    let centroid = mesh.centroid()?;
    let mut out = mesh.clone();
    out.translate(-centroid.coords);

    let max_range = out.bounds().max_extent();
    if max_range == 0.0 {
        debug!("All vertices coincide, skipping scale");
    } else {
        for vertex in &mut out.vertices {
            vertex.position.coords /= max_range;
        }
    }

    debug!(
        vertices = out.vertex_count(),
        centroid = ?centroid.coords.as_slice(),
        max_range,
        "Normalized mesh"
    );

    Some(Normalized {
        mesh: out,
        centroid,
        max_range,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{Triangle, Vector3, Vertex};

    fn scenario() -> IndexedMesh {
        IndexedMesh::from_triangles([Triangle::from_arrays(
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
        )])
    }

    fn skewed_box() -> IndexedMesh {
        IndexedMesh::from_triangles([
            Triangle::from_arrays([10.0, -4.0, 3.0], [17.0, -4.0, 3.0], [10.0, -1.0, 3.0]),
            Triangle::from_arrays([10.0, -4.0, 5.0], [17.0, -1.0, 5.0], [12.0, -2.0, 4.0]),
            Triangle::from_arrays([11.0, -3.0, 3.5], [16.0, -2.5, 4.5], [13.0, -1.5, 5.0]),
        ])
    }

    #[test]
    fn scenario_triangle() {
        let n = normalize(&scenario()).unwrap();

        assert_relative_eq!(n.centroid().x, 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(n.centroid().y, 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(n.centroid().z, 0.0);
        assert_eq!(n.max_range(), 2.0);
        assert!(!n.is_degenerate());

        let expected = [
            [-2.0 / 3.0 / 2.0, -2.0 / 3.0 / 2.0, 0.0],
            [4.0 / 3.0 / 2.0, -2.0 / 3.0 / 2.0, 0.0],
            [-2.0 / 3.0 / 2.0, 4.0 / 3.0 / 2.0, 0.0],
        ];
        for (v, e) in n.mesh().vertices.iter().zip(expected) {
            assert_relative_eq!(v.position.x, e[0], epsilon = 1e-12);
            assert_relative_eq!(v.position.y, e[1], epsilon = 1e-12);
            assert_relative_eq!(v.position.z, e[2], epsilon = 1e-12);
        }
    }

    #[test]
    fn result_is_centered() {
        let n = normalize(&skewed_box()).unwrap();
        let c = n.mesh().centroid().unwrap();
        assert_relative_eq!(c.coords.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn longest_axis_spans_one() {
        let n = normalize(&skewed_box()).unwrap();
        assert_relative_eq!(n.max_range(), 7.0, epsilon = 1e-12);
        assert_relative_eq!(n.mesh().bounds().max_extent(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn faces_and_winding_unchanged() {
        let mesh = skewed_box();
        let n = normalize(&mesh).unwrap();
        assert_eq!(n.mesh().faces, mesh.faces);

        for (before, after) in mesh.triangles().zip(n.mesh().triangles()) {
            let a = before.normal().unwrap();
            let b = after.normal().unwrap();
            assert_relative_eq!(a.dot(&b), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn coincident_vertices_stay_unscaled() {
        let p = [3.0, -1.0, 8.0];
        let mesh = IndexedMesh::from_triangles([
            Triangle::from_arrays(p, p, p),
            Triangle::from_arrays(p, p, p),
        ]);

        let n = normalize(&mesh).unwrap();
        assert!(n.is_degenerate());
        for v in &n.mesh().vertices {
            assert!(v.is_finite());
            assert_eq!(v.position.coords, Vector3::zeros());
        }
    }

    #[test]
    fn flat_mesh_is_scaled_by_its_longest_axis() {
        let mesh = IndexedMesh::from_triangles([Triangle::from_arrays(
            [0.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
            [4.0, 1.0, 0.0],
        )]);
        let n = normalize(&mesh).unwrap();
        let size = n.mesh().bounds().size();
        assert_relative_eq!(size.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(size.y, 0.25, epsilon = 1e-12);
        assert_eq!(size.z, 0.0);
    }

    #[test]
    fn empty_input_is_none() {
        assert!(normalize(&IndexedMesh::new()).is_none());

        let mut no_faces = IndexedMesh::new();
        no_faces.vertices.push(Vertex::from_coords(1.0, 2.0, 3.0));
        assert!(normalize(&no_faces).is_none());
    }

    #[test]
    fn input_is_not_modified() {
        let mesh = scenario();
        let copy = mesh.clone();
        let _ = normalize(&mesh);
        assert_eq!(mesh, copy);
    }
}
