//! Immutable scene descriptions.

use mesh_types::{IndexedMesh, MeshTopology, Point3, Vertex};
use serde::Serialize;
use tracing::debug;

use crate::display::DisplayOptions;
use crate::error::{SceneError, SceneResult};
use crate::normalize::normalize;

/// A normalized mesh plus everything the renderer needs to draw it.
///
/// Built once per successful load and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescription {
    mesh: IndexedMesh,
    centroid: Point3<f64>,
    max_range: f64,
    display: DisplayOptions,
}

impl SceneDescription {
    /// Normalize `mesh` and package it with `display`.
    ///
    /// # Errors
    ///
    /// [`SceneError::EmptyInput`] when the mesh has no vertices or faces,
    /// [`SceneError::FaceOutOfRange`] when a face addresses a missing vertex.
    pub fn try_from_mesh(mesh: &IndexedMesh, display: &DisplayOptions) -> SceneResult<Self> {
        if let Some((face, index)) = mesh.first_dangling_index() {
            return Err(SceneError::FaceOutOfRange {
                face,
                index,
                vertex_count: mesh.vertex_count(),
            });
        }

        let normalized = normalize(mesh).ok_or(SceneError::EmptyInput)?;
        let centroid = normalized.centroid();
        let max_range = normalized.max_range();

        Ok(Self {
            mesh: normalized.into_mesh(),
            centroid,
            max_range,
            display: display.clone(),
        })
    }

    /// Normalized vertex buffer.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.mesh.vertices
    }

    /// Face index buffer, identical to the source mesh's.
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.mesh.faces
    }

    /// The normalized mesh.
    #[must_use]
    pub const fn mesh(&self) -> &IndexedMesh {
        &self.mesh
    }

    /// Centroid of the source mesh.
    #[must_use]
    pub const fn centroid(&self) -> Point3<f64> {
        self.centroid
    }

    /// Longest axis of the recentered source mesh.
    #[must_use]
    pub const fn max_range(&self) -> f64 {
        self.max_range
    }

    /// True when the source mesh collapsed to a single point.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_degenerate(&self) -> bool {
        self.max_range == 0.0
    }

    /// Display options.
    #[must_use]
    pub const fn display(&self) -> &DisplayOptions {
        &self.display
    }

    /// Number of vertex slots.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }
}

/// Build a scene from a loaded mesh.
///
/// An empty mesh is not an error: it produces `Ok(None)` and nothing is
/// drawn.
///
/// # Errors
///
/// [`SceneError::FaceOutOfRange`] when a face addresses a missing vertex.
///
/// # Example
///
/// ```
/// use mesh_scene::{build_scene, DisplayOptions};
/// use mesh_types::{IndexedMesh, Triangle};
///
/// let mesh = IndexedMesh::from_triangles([Triangle::from_arrays(
///     [0.0, 0.0, 0.0],
///     [2.0, 0.0, 0.0],
///     [0.0, 2.0, 0.0],
/// )]);
///
/// let scene = build_scene(&mesh, &DisplayOptions::default()).unwrap().unwrap();
/// assert_eq!(scene.faces(), &[[0, 1, 2]]);
///
/// assert!(build_scene(&IndexedMesh::new(), &DisplayOptions::default())
///     .unwrap()
///     .is_none());
/// ```
pub fn build_scene(
    mesh: &IndexedMesh,
    display: &DisplayOptions,
) -> SceneResult<Option<SceneDescription>> {
    match SceneDescription::try_from_mesh(mesh, display) {
        Ok(scene) => {
            debug!(
                vertices = scene.vertex_count(),
                faces = scene.face_count(),
                degenerate = scene.is_degenerate(),
                "Built scene"
            );
            Ok(Some(scene))
        }
        Err(SceneError::EmptyInput) => {
            debug!("Empty mesh, no scene");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{MeshBounds, Triangle};

    fn prism() -> IndexedMesh {
        IndexedMesh::from_triangles([
            Triangle::from_arrays([0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 3.0, 0.0]),
            Triangle::from_arrays([0.0, 0.0, 1.0], [4.0, 0.0, 1.0], [0.0, 3.0, 1.0]),
        ])
    }

    #[test]
    fn scene_keeps_faces_and_display() {
        let display = DisplayOptions::default().with_color("gold");
        let scene = build_scene(&prism(), &display).unwrap().unwrap();

        assert_eq!(scene.faces(), &[[0, 1, 2], [3, 4, 5]]);
        assert_eq!(scene.vertices().len(), 3 * scene.faces().len());
        assert_eq!(scene.display().color, "gold");
        assert_eq!(scene.max_range(), 4.0);
        assert_relative_eq!(scene.mesh().bounds().max_extent(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn dangling_face_is_an_error() {
        let mut mesh = prism();
        mesh.faces.push([0, 1, 42]);

        let err = build_scene(&mesh, &DisplayOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            SceneError::FaceOutOfRange {
                face: 2,
                index: 42,
                vertex_count: 6
            }
        ));
    }

    #[test]
    fn empty_mesh_is_no_scene() {
        let display = DisplayOptions::default();
        assert!(build_scene(&IndexedMesh::new(), &display).unwrap().is_none());
        assert!(matches!(
            SceneDescription::try_from_mesh(&IndexedMesh::new(), &display),
            Err(SceneError::EmptyInput)
        ));
    }

    #[test]
    fn degenerate_scene_is_finite() {
        let p = [1.0, 1.0, 1.0];
        let mesh = IndexedMesh::from_triangles([Triangle::from_arrays(p, p, p)]);
        let scene = build_scene(&mesh, &DisplayOptions::default())
            .unwrap()
            .unwrap();
        assert!(scene.is_degenerate());
        assert!(scene.vertices().iter().all(Vertex::is_finite));
    }

    #[test]
    fn serializes_to_json() {
        let scene = build_scene(&prism(), &DisplayOptions::default())
            .unwrap()
            .unwrap();
        let value = serde_json::to_value(&scene).unwrap();
        assert_eq!(value["max_range"], 4.0);
        assert_eq!(value["display"]["aspect_mode"], "data");
        assert_eq!(value["mesh"]["faces"][1], serde_json::json!([3, 4, 5]));
    }
}
