//! STL (Stereolithography) file format support.
//!
//! Supports both ASCII and binary STL formats.
//!
//! # Format Detection
//!
//! The parser decides between ASCII and binary from the bytes alone:
//! - Input that does not start with "solid" (any case, after optional
//!   whitespace) is binary
//! - Input that does, but whose length matches the binary layout exactly or
//!   whose 80-byte header contains NUL bytes, is binary as well
//! - Everything else is tried as ASCII first, then as binary if the text
//!   does not parse
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (often not accurate)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (usually 0)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_types::{IndexedMesh, MeshTopology, Point3, Triangle, Vector3};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Header plus the little-endian triangle count.
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlEncoding {
    /// Text STL (`solid ... endsolid`).
    Ascii,
    /// Little-endian binary STL.
    Binary,
}

/// Guess the encoding of raw STL bytes.
///
/// # Example
///
/// ```
/// use mesh_io::{detect_encoding, StlEncoding};
///
/// assert_eq!(detect_encoding(b"solid cube\nendsolid cube\n"), StlEncoding::Ascii);
/// assert_eq!(detect_encoding(&[0u8; 84]), StlEncoding::Binary);
/// ```
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> StlEncoding {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let is_solid = bytes[start..]
        .get(..5)
        .is_some_and(|word| word.eq_ignore_ascii_case(b"solid"));
    if !is_solid {
        return StlEncoding::Binary;
    }

    // Some exporters write "solid" into binary headers.
    if let Some(count) = declared_triangle_count(bytes) {
        if binary_len(count) == bytes.len() as u64 {
            return StlEncoding::Binary;
        }
    }
    if bytes[..bytes.len().min(HEADER_SIZE)].contains(&0) {
        return StlEncoding::Binary;
    }

    StlEncoding::Ascii
}

/// Parse STL bytes into a triangle-soup mesh.
///
/// Triangle `k` of the file becomes vertex slots `3k..3k + 3` and face
/// `[3k, 3k + 1, 3k + 2]`. The mesh is only returned once the whole input
/// has parsed.
///
/// # Errors
///
/// Returns an error if the input is empty, truncated, not valid STL,
/// contains non-finite coordinates, or holds no triangles.
///
/// # Example
///
/// ```
/// use mesh_io::parse_stl;
///
/// let text = b"solid t
///   facet normal 0 0 1
///     outer loop
///       vertex 0 0 0
///       vertex 2 0 0
///       vertex 0 2 0
///     endloop
///   endfacet
/// endsolid t";
///
/// let mesh = parse_stl(text).unwrap();
/// assert_eq!(mesh.vertices.len(), 3);
/// assert_eq!(mesh.faces, vec![[0, 1, 2]]);
/// ```
pub fn parse_stl(bytes: &[u8]) -> IoResult<IndexedMesh> {
    if bytes.is_empty() {
        return Err(IoError::EmptyInput);
    }

    let encoding = detect_encoding(bytes);
    debug!(bytes = bytes.len(), ?encoding, "Parsing STL");

    let mesh = match encoding {
        StlEncoding::Binary => parse_binary(bytes)?,
        StlEncoding::Ascii => parse_ascii_or_binary(bytes)?,
    };

    if mesh.faces.is_empty() {
        return Err(IoError::NoTriangles);
    }

    debug!(
        triangles = mesh.face_count(),
        vertices = mesh.vertex_count(),
        "Parsed STL"
    );
    Ok(mesh)
}

/// Load a mesh from an STL file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing file, [`IoError::Io`]
/// for other read failures, and any error [`parse_stl`] reports.
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;
    parse_stl(&bytes)
}

/// Binary files may start with "solid" too. When the text does not parse,
/// the bytes get a second chance as binary; the ASCII error wins if both fail.
fn parse_ascii_or_binary(bytes: &[u8]) -> IoResult<IndexedMesh> {
    let ascii_err = match std::str::from_utf8(bytes)
        .map_err(IoError::from)
        .and_then(parse_ascii)
    {
        Ok(mesh) => return Ok(mesh),
        Err(e) => e,
    };

    debug!(error = %ascii_err, "ASCII parse failed, retrying as binary");
    parse_binary(bytes).map_err(|_| ascii_err)
}

fn declared_triangle_count(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_SIZE..PREAMBLE_SIZE)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

fn binary_len(count: u32) -> u64 {
    PREAMBLE_SIZE as u64 + u64::from(count) * TRIANGLE_SIZE as u64
}

fn parse_binary(bytes: &[u8]) -> IoResult<IndexedMesh> {
    let Some(count) = declared_triangle_count(bytes) else {
        return Err(IoError::InvalidHeader {
            expected: PREAMBLE_SIZE,
            got: bytes.len(),
        });
    };

    let expected = binary_len(count);
    let got = bytes.len() as u64;
    if got < expected {
        return Err(IoError::Truncated {
            declared: count,
            expected,
            got,
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    // `expected` is at most `bytes.len()`, which is a usize
    let end = expected as usize;
    let mut mesh = IndexedMesh::with_capacity(count as usize * 3, count as usize);

    for (i, record) in bytes[PREAMBLE_SIZE..end]
        .chunks_exact(TRIANGLE_SIZE)
        .enumerate()
    {
        let normal = read_vector(&record[0..12]);
        let triangle = Triangle::new(
            Point3::from(read_vector(&record[12..24])),
            Point3::from(read_vector(&record[24..36])),
            Point3::from(read_vector(&record[36..48])),
        );
        if !triangle.is_finite() {
            return Err(IoError::invalid_content(format!(
                "triangle {i} has a non-finite coordinate"
            )));
        }
        mesh.push_triangle(&triangle, finite(normal));
    }

    Ok(mesh)
}

/// Read 3 little-endian f32s from 12 bytes.
fn read_vector(buf: &[u8]) -> Vector3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vector3::new(f64::from(x), f64::from(y), f64::from(z))
}

fn finite(v: Vector3<f64>) -> Option<Vector3<f64>> {
    v.iter().all(|c| c.is_finite()).then_some(v)
}

fn parse_ascii(text: &str) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut in_facet = false;
    let mut in_loop = false;
    let mut normal: Option<Vector3<f64>> = None;
    let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "solid" => {
                if in_facet {
                    return Err(IoError::invalid_line(line_no, "`solid` inside a facet"));
                }
            }
            "facet" => {
                if in_facet {
                    return Err(IoError::invalid_line(line_no, "facet opened before `endfacet`"));
                }
                in_facet = true;
                corners.clear();
                normal = match parts.next() {
                    Some(word) if word.eq_ignore_ascii_case("normal") => {
                        finite(Vector3::from(parse_triple(parts, line_no)?))
                    }
                    Some(word) => {
                        return Err(IoError::invalid_line(
                            line_no,
                            format!("expected `normal`, found `{word}`"),
                        ));
                    }
                    None => None,
                };
            }
            "outer" => {
                if !in_facet || !parts.next().is_some_and(|w| w.eq_ignore_ascii_case("loop")) {
                    return Err(IoError::invalid_line(line_no, "misplaced `outer loop`"));
                }
                in_loop = true;
            }
            "vertex" => {
                if !in_loop {
                    return Err(IoError::invalid_line(line_no, "vertex outside of a loop"));
                }
                if corners.len() == 3 {
                    return Err(IoError::invalid_line(
                        line_no,
                        "more than three vertices in a facet",
                    ));
                }
                corners.push(Point3::from(parse_triple(parts, line_no)?));
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                if !in_facet {
                    return Err(IoError::invalid_line(line_no, "`endfacet` without `facet`"));
                }
                let [v0, v1, v2] = corners[..] else {
                    return Err(IoError::invalid_line(
                        line_no,
                        format!("facet has {} vertices, expected 3", corners.len()),
                    ));
                };
                let triangle = Triangle::new(v0, v1, v2);
                if !triangle.is_finite() {
                    return Err(IoError::invalid_line(line_no, "non-finite coordinate"));
                }
                mesh.push_triangle(&triangle, normal.take());
                corners.clear();
                in_facet = false;
            }
            "endsolid" => break,
            other => {
                return Err(IoError::invalid_line(
                    line_no,
                    format!("unexpected keyword `{other}`"),
                ));
            }
        }
    }

    if in_facet {
        return Err(IoError::invalid_content("unterminated facet at end of input"));
    }

    Ok(mesh)
}

fn parse_triple<'a>(mut parts: impl Iterator<Item = &'a str>, line: usize) -> IoResult<[f64; 3]> {
    let mut out = [0.0; 3];
    for slot in &mut out {
        let token = parts
            .next()
            .ok_or_else(|| IoError::invalid_line(line, "expected three coordinates"))?;
        *slot = token.parse()?;
    }
    if parts.next().is_some() {
        return Err(IoError::invalid_line(line, "expected three coordinates"));
    }
    Ok(out)
}

/// Write a mesh as STL.
///
/// Face normals are recomputed from the winding order. Faces that
/// reference a missing vertex are skipped.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_stl<W: Write>(mesh: &IndexedMesh, writer: W, encoding: StlEncoding) -> IoResult<()> {
    let triangles: Vec<Triangle> = mesh.triangles().collect();
    match encoding {
        StlEncoding::Binary => write_binary(&triangles, writer),
        StlEncoding::Ascii => write_ascii(&triangles, writer),
    }
}

/// Save a mesh to an STL file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_stl, save_stl, StlEncoding};
///
/// let mesh = load_stl("input.stl").unwrap();
/// save_stl(&mesh, "output.stl", StlEncoding::Binary).unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(
    mesh: &IndexedMesh,
    path: P,
    encoding: StlEncoding,
) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_stl(mesh, &mut writer, encoding)?;
    writer.flush()?;
    Ok(())
}

fn write_binary<W: Write>(triangles: &[Triangle], mut writer: W) -> IoResult<()> {
    let mut header = [b' '; HEADER_SIZE];
    let text = b"Binary STL written by mesh-io";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;

    let count = u32::try_from(triangles.len())
        .map_err(|_| IoError::invalid_content("too many triangles for binary STL"))?;
    writer.write_all(&count.to_le_bytes())?;

    for tri in triangles {
        let normal = tri.normal().unwrap_or_else(Vector3::zeros);
        write_f32_triple(&mut writer, normal.x, normal.y, normal.z)?;
        for p in tri.vertices() {
            write_f32_triple(&mut writer, p.x, p.y, p.z)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
// Truncation: f64 to f32 is intentional for STL format
fn write_f32_triple<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> IoResult<()> {
    writer.write_all(&(x as f32).to_le_bytes())?;
    writer.write_all(&(y as f32).to_le_bytes())?;
    writer.write_all(&(z as f32).to_le_bytes())?;
    Ok(())
}

fn write_ascii<W: Write>(triangles: &[Triangle], mut writer: W) -> IoResult<()> {
    writeln!(writer, "solid mesh")?;

    for tri in triangles {
        let n = tri.normal().unwrap_or_else(Vector3::zeros);
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for p in tri.vertices() {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", p.x, p.y, p.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid mesh")?;
    Ok(())
}
