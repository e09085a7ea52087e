//! Vertex slots.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One vertex slot: a position, plus the facet normal it was read with.
///
/// STL carries one normal per facet and many exporters write zeros there,
/// so the normal is optional and only ever stored at unit length.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Vector3, Vertex};
///
/// let plain = Vertex::from_coords(1.0, 2.0, 3.0);
/// assert!(plain.normal.is_none());
///
/// let lit = Vertex::with_normal(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 4.0, 0.0));
/// assert_eq!(lit.normal, Some(Vector3::y()));
/// assert_eq!(lit.position, plain.position);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position.
    pub position: Point3<f64>,

    /// Unit facet normal, when the source had a usable one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub normal: Option<Vector3<f64>>,
}

impl Vertex {
    /// Vertex at `position`, no normal.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: None,
        }
    }

    /// Vertex at `(x, y, z)`, no normal.
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Vertex with `normal` rescaled to unit length. Zero-length normals
    /// are discarded.
    #[must_use]
    pub fn with_normal(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            position,
            normal: normal.try_normalize(f64::EPSILON),
        }
    }

    /// No NaN or infinite coordinate in the position.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|c| c.is_finite())
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_normal_is_dropped() {
        let v = Vertex::with_normal(Point3::origin(), Vector3::zeros());
        assert!(v.normal.is_none());
    }

    #[test]
    fn normal_is_unit_length() {
        let v = Vertex::with_normal(Point3::origin(), Vector3::new(3.0, 0.0, 4.0));
        let n = v.normal.unwrap();
        assert!((n.norm() - 1.0).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn non_finite_positions() {
        assert!(Vertex::from_coords(-1.0, 0.5, 1e300).is_finite());
        assert!(!Vertex::from_coords(0.0, f64::NEG_INFINITY, 0.0).is_finite());
        assert!(!Vertex::from([f64::NAN, 0.0, 0.0]).is_finite());
    }
}
