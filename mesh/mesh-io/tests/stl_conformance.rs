//! Conformance tests for STL loading.
//!
//! Generated meshes cover the load invariants: `T` triangles always come
//! back as `3T` vertices and `T` faces `[3k, 3k + 1, 3k + 2]`, in file
//! order, for both encodings and through the upload staging path.
//!
//! Every `.stl` under `tests/fixtures/` must load and satisfy the same
//! invariants. More models can be dropped in there to extend the suite.
//!
//! To run: cargo test -p mesh-io --test stl_conformance

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_precision_loss)]

use std::path::{Path, PathBuf};

use mesh_io::{
    IoError, StagingArea, StlEncoding, UploadLimits, load_stl, parse_stl, save_stl, write_stl,
};
use mesh_types::{IndexedMesh, MeshTopology, Triangle};
use tempfile::tempdir;

/// Get the path to test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get all STL files in the fixtures directory.
fn get_stl_files() -> Vec<PathBuf> {
    std::fs::read_dir(fixtures_dir())
        .into_iter()
        .flatten()
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("stl"))
                .then_some(path)
        })
        .collect()
}

/// A fan of `count` distinct triangles around the origin.
fn fan(count: usize) -> IndexedMesh {
    IndexedMesh::from_triangles((0..count).map(|k| {
        let a = k as f64 * 0.1;
        let b = a + 0.1;
        Triangle::from_arrays(
            [0.0, 0.0, k as f64],
            [a.cos(), a.sin(), k as f64],
            [b.cos(), b.sin(), k as f64 + 0.5],
        )
    }))
}

fn encode(mesh: &IndexedMesh, encoding: StlEncoding) -> Vec<u8> {
    let mut buf = Vec::new();
    write_stl(mesh, &mut buf, encoding).unwrap();
    buf
}

fn assert_soup(mesh: &IndexedMesh, triangles: usize) {
    assert_eq!(mesh.vertex_count(), 3 * triangles);
    assert_eq!(mesh.face_count(), triangles);
    for (k, face) in mesh.faces.iter().enumerate() {
        let base = u32::try_from(3 * k).unwrap();
        assert_eq!(*face, [base, base + 1, base + 2], "face {k}");
    }
}

fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

// =============================================================================
// Count and index invariants
// =============================================================================

#[test]
fn counts_hold_for_both_encodings() {
    for triangles in [1, 2, 7, 100] {
        let source = fan(triangles);
        for encoding in [StlEncoding::Binary, StlEncoding::Ascii] {
            let mesh = parse_stl(&encode(&source, encoding)).unwrap();
            assert_soup(&mesh, triangles);
        }
    }
}

#[test]
fn triangles_keep_file_order() {
    let source = fan(12);
    let mesh = parse_stl(&encode(&source, StlEncoding::Binary)).unwrap();
    for (k, tri) in mesh.triangles().enumerate() {
        assert!((tri.v0.z - k as f64).abs() < 1e-6, "triangle {k} out of order");
    }
}

#[test]
fn scenario_triangle_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scenario.stl");
    let source = IndexedMesh::from_triangles([Triangle::from_arrays(
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [0.0, 2.0, 0.0],
    )]);
    save_stl(&source, &path, StlEncoding::Binary).unwrap();

    let mesh = load_stl(&path).unwrap();
    assert_soup(&mesh, 1);
    assert!((mesh.vertices[1].position.x - 2.0).abs() < f64::EPSILON);
    assert!((mesh.vertices[2].position.y - 2.0).abs() < f64::EPSILON);
}

// =============================================================================
// Failure paths
// =============================================================================

#[test]
fn missing_file() {
    let result = load_stl("nonexistent_file_12345.stl");
    match result {
        Err(IoError::FileNotFound { path }) => {
            assert!(path.to_string_lossy().contains("nonexistent"));
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn zero_byte_upload_is_no_mesh() {
    let dir = tempdir().unwrap();
    let staging = StagingArea::new(dir.path(), UploadLimits::default());
    assert!(matches!(
        staging.load_upload("empty.stl", &[]),
        Err(IoError::EmptyInput)
    ));
    assert!(dir_is_empty(dir.path()));
}

#[test]
fn malformed_header_cleans_up() {
    let dir = tempdir().unwrap();
    let staging = StagingArea::new(dir.path().join("temp"), UploadLimits::default());

    let result = staging.load_upload("bad.stl", b"not an stl at all");
    assert!(result.is_err());
    assert!(dir_is_empty(&dir.path().join("temp")));
}

#[test]
fn truncated_upload_cleans_up() {
    let dir = tempdir().unwrap();
    let staging = StagingArea::new(dir.path(), UploadLimits::default());

    let mut bytes = encode(&fan(5), StlEncoding::Binary);
    bytes.truncate(bytes.len() - 1);

    assert!(matches!(
        staging.load_upload("short.stl", &bytes),
        Err(IoError::Truncated { declared: 5, .. })
    ));
    assert!(dir_is_empty(dir.path()));
}

#[test]
fn upload_roundtrip_cleans_up() {
    let dir = tempdir().unwrap();
    let staging = StagingArea::new(dir.path(), UploadLimits::default());

    let mesh = staging
        .load_upload("fan.STL", &encode(&fan(3), StlEncoding::Ascii))
        .unwrap();
    assert_soup(&mesh, 3);
    assert!(dir_is_empty(dir.path()));
}

// =============================================================================
// Fixture files
// =============================================================================

#[test]
fn fixtures_load() {
    let files = get_stl_files();
    assert!(
        !files.is_empty(),
        "no STL fixtures in {}",
        fixtures_dir().display()
    );

    for file in &files {
        let mesh = load_stl(file)
            .unwrap_or_else(|e| panic!("Failed to load {}: {e}", file.display()));
        let triangles = mesh.face_count();
        assert!(triangles > 0, "{} has no faces", file.display());
        assert_soup(&mesh, triangles);
    }
}
