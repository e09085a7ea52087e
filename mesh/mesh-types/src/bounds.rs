//! Axis-aligned extents.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest axis-aligned box containing a set of points.
///
/// Normalization reads two things off it: the per-axis peak-to-peak spread
/// ([`size`](Self::size)) and the largest of those spreads
/// ([`max_extent`](Self::max_extent)).
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let corners = [Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 0.5, 2.0)];
/// let aabb = Aabb::from_points(corners.iter());
///
/// assert_eq!(aabb.size().x, 4.0);
/// assert_eq!(aabb.size().z, 0.0);
/// assert_eq!(aabb.max_extent(), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Componentwise minimum.
    pub min: Point3<f64>,
    /// Componentwise maximum.
    pub max: Point3<f64>,
}

impl Aabb {
    /// The box containing nothing: `min = +inf`, `max = -inf`.
    ///
    /// Growing it by any point yields the degenerate box at that point.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::from(Vector3::repeat(f64::INFINITY)),
            max: Point3::from(Vector3::repeat(f64::NEG_INFINITY)),
        }
    }

    /// Box around `points`, or [`empty`](Self::empty) if there are none.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        points.into_iter().fold(Self::empty(), |mut acc, p| {
            acc.include(p);
            acc
        })
    }

    /// Grow to contain `point`.
    #[inline]
    pub fn include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// True if no point has been included. A single-point box is not empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    /// `max - min` per axis; zero for an empty box.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    /// Largest per-axis spread.
    #[inline]
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.size().max()
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_point_by_point() {
        let mut aabb = Aabb::empty();
        assert!(aabb.is_empty());

        aabb.include(&Point3::new(1.0, 2.0, 3.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.size(), Vector3::zeros());

        aabb.include(&Point3::new(-1.0, 2.5, 3.0));
        assert_eq!(aabb.min, Point3::new(-1.0, 2.0, 3.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.5, 3.0));
    }

    #[test]
    fn empty_box_has_zero_extent() {
        let aabb = Aabb::default();
        assert_eq!(aabb.size(), Vector3::zeros());
        assert!(aabb.max_extent().abs() < f64::EPSILON);
    }

    #[test]
    fn extent_picks_longest_axis() {
        let points = [Point3::new(0.0, -3.0, 1.0), Point3::new(2.0, 4.0, 1.5)];
        let aabb = Aabb::from_points(points.iter());
        assert!((aabb.max_extent() - 7.0).abs() < f64::EPSILON);
    }
}
