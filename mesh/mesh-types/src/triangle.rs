//! One facet with resolved corner positions.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Three corner positions in winding order.
///
/// An STL facet is read into a `Triangle` first and then appended to an
/// [`IndexedMesh`](crate::IndexedMesh) as three fresh vertex slots.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// Corner 0.
    pub v0: Point3<f64>,
    /// Corner 1.
    pub v1: Point3<f64>,
    /// Corner 2.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Triangle from `[x, y, z]` arrays.
    ///
    /// ```
    /// use mesh_types::Triangle;
    ///
    /// let t = Triangle::from_arrays([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
    /// assert_eq!(t.v1.x, 2.0);
    /// ```
    #[must_use]
    pub fn from_arrays(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> Self {
        Self::new(v0.into(), v1.into(), v2.into())
    }

    /// Corners as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Right-handed unit normal, `None` when the corners are collinear.
    ///
    /// ```
    /// use mesh_types::Triangle;
    ///
    /// let t = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    /// assert_eq!(t.normal().unwrap().z, 1.0);
    /// ```
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        (self.v1 - self.v0)
            .cross(&(self.v2 - self.v0))
            .try_normalize(f64::EPSILON)
    }

    /// No NaN or infinite coordinates.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.vertices()
            .iter()
            .flat_map(|p| p.iter())
            .all(|c| c.is_finite())
    }
}
