//! Point-cloud container and axis-aligned spatial bounds.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pose::RigidPose;

/// An ordered sequence of 3D points.
///
/// Order is preserved through cropping and rigid transformation so that a
/// demonstration's start and final clouds stay in point-wise
/// correspondence.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointCloud {
    /// The points, in insertion order.
    pub points: Vec<Point3<f64>>,
}

impl PointCloud {
    /// Creates an empty cloud.
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Creates a cloud from a point vector.
    #[must_use]
    pub fn from_points(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends the points of another cloud.
    pub fn extend_from(&mut self, other: &Self) {
        self.points.extend_from_slice(&other.points);
    }

    /// Mean of all points, or `None` for an empty cloud.
    #[must_use]
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        #[allow(clippy::cast_precision_loss)]
        Some(Point3::from(sum / self.points.len() as f64))
    }

    /// Extent of the cloud's axis-aligned bounding box, or `None` for an
    /// empty cloud.
    #[must_use]
    pub fn extents(&self) -> Option<Vector3<f64>> {
        let first = self.points.first()?;
        let mut min = first.coords;
        let mut max = first.coords;
        for p in &self.points {
            min = min.inf(&p.coords);
            max = max.sup(&p.coords);
        }
        Some(max - min)
    }

    /// Returns the cloud rigidly transformed by `pose`.
    #[must_use]
    pub fn transformed(&self, pose: &RigidPose) -> Self {
        Self {
            points: self.points.iter().map(|p| pose.transform_point(p)).collect(),
        }
    }

    /// Returns the subset of points inside `bounds`, order preserved.
    #[must_use]
    pub fn cropped(&self, bounds: &Aabb) -> Self {
        Self {
            points: self
                .points
                .iter()
                .copied()
                .filter(|p| bounds.contains(p))
                .collect(),
        }
    }
}

impl FromIterator<Point3<f64>> for PointCloud {
    fn from_iter<T: IntoIterator<Item = Point3<f64>>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Axis-aligned bounding box used as a spatial crop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Creates a box from two corners.
    #[must_use]
    pub const fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: &Point3<f64>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Whether min ≤ max on every axis and all coordinates are finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.coords.iter().all(|x| x.is_finite())
            && self.max.coords.iter().all(|x| x.is_finite())
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }
}
