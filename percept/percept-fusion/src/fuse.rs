//! Multi-view fusion with centroid-radius outlier rejection.

use nalgebra::Point3;
use tracing::debug;

use placement_types::{Aabb, ObjectRole, PointCloud};

use crate::error::{FusionError, Result};

/// Result of fusing one object's per-camera point sets.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionOutcome {
    /// The fused, cropped, outlier-filtered cloud.
    pub cloud: PointCloud,
    /// Points across all views before cropping.
    pub input_points: usize,
    /// Points dropped by the workspace crop.
    pub cropped_out: usize,
    /// Points dropped by the centroid-radius filter.
    pub outliers_removed: usize,
    /// Centroid the filter was anchored on.
    pub centroid: Point3<f64>,
}

impl FusionOutcome {
    /// Fraction of the cropped points rejected as outliers.
    #[must_use]
    pub fn outlier_fraction(&self) -> f64 {
        let cropped = self.cloud.len() + self.outliers_removed;
        if cropped == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.outliers_removed as f64 / cropped as f64
        }
    }
}

impl std::fmt::Display for FusionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fusion: {} → {} points ({} cropped, {} outliers)",
            self.input_points,
            self.cloud.len(),
            self.cropped_out,
            self.outliers_removed
        )
    }
}

/// Fuses per-camera point sets for one object role.
///
/// Each view is cropped to `bounds`, the survivors are concatenated in
/// camera order, and points farther than `outlier_radius` from the
/// concatenated cloud's centroid are discarded. The filter is a single
/// pass: the centroid is not recomputed after rejection.
///
/// # Errors
///
/// - [`FusionError::InvalidRadius`] for a non-positive or non-finite
///   radius.
/// - [`FusionError::EmptyObservation`] when no view contributes a point
///   after cropping — the object is effectively invisible and the trial
///   must not proceed to composing a transform.
pub fn fuse_views(
    role: ObjectRole,
    views: &[PointCloud],
    bounds: &Aabb,
    outlier_radius: f64,
) -> Result<FusionOutcome> {
    if !outlier_radius.is_finite() || outlier_radius <= 0.0 {
        return Err(FusionError::InvalidRadius {
            radius: outlier_radius,
        });
    }

    let input_points: usize = views.iter().map(PointCloud::len).sum();
    let mut merged = PointCloud::new();
    for view in views {
        merged.extend_from(&view.cropped(bounds));
    }
    let cropped_out = input_points - merged.len();

    let Some(centroid) = merged.centroid() else {
        return Err(FusionError::EmptyObservation { role });
    };

    let kept: Vec<Point3<f64>> = merged
        .points
        .iter()
        .copied()
        .filter(|p| (p - centroid).norm() < outlier_radius)
        .collect();
    let outliers_removed = merged.len() - kept.len();

    let outcome = FusionOutcome {
        cloud: PointCloud::from_points(kept),
        input_points,
        cropped_out,
        outliers_removed,
        centroid,
    };
    debug!(
        role = role.as_str(),
        input = input_points,
        kept = outcome.cloud.len(),
        cropped = cropped_out,
        outliers = outliers_removed,
        "fused object views"
    );
    Ok(outcome)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wide_bounds() -> Aabb {
        Aabb::new(
            Point3::new(-10.0, -10.0, -10.0),
            Point3::new(10.0, 10.0, 10.0),
        )
    }

    #[test]
    fn test_retains_exact_inlier_set() {
        // 95 points inside radius 0.05 of a common centroid, 5 far away.
        let mut points = Vec::new();
        for i in 0..95 {
            let angle = f64::from(i) * 0.3;
            points.push(Point3::new(
                0.04 * angle.cos(),
                0.04 * angle.sin(),
                0.01 * (f64::from(i % 5) - 2.0),
            ));
        }
        for i in 0..5 {
            let angle = f64::from(i) * 1.3;
            points.push(Point3::new(5.0 * angle.cos(), 5.0 * angle.sin(), 0.0));
        }
        let cloud = PointCloud::from_points(points);

        let outcome = fuse_views(ObjectRole::Child, &[cloud], &wide_bounds(), 0.2).unwrap();
        assert_eq!(outcome.cloud.len(), 95);
        assert_eq!(outcome.outliers_removed, 5);
        // The far points barely move the centroid; every inlier survives.
        for p in &outcome.cloud.points {
            assert!(p.coords.norm() < 0.3);
        }
    }

    #[test]
    fn test_concatenates_across_cameras() {
        let a = PointCloud::from_points(vec![Point3::new(0.0, 0.0, 0.0)]);
        let b = PointCloud::from_points(vec![Point3::new(0.01, 0.0, 0.0)]);
        let outcome = fuse_views(ObjectRole::Parent, &[a, b], &wide_bounds(), 0.2).unwrap();
        assert_eq!(outcome.cloud.len(), 2);
        assert_relative_eq!(outcome.centroid.x, 0.005, epsilon = 1e-12);
    }

    #[test]
    fn test_crop_applies_before_centroid() {
        // A distant blob that would drag the centroid is cropped away first.
        let near = PointCloud::from_points(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.05, 0.0, 0.0),
        ]);
        let far = PointCloud::from_points(vec![Point3::new(50.0, 0.0, 0.0)]);
        let bounds = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let outcome = fuse_views(ObjectRole::Parent, &[near, far], &bounds, 0.2).unwrap();
        assert_eq!(outcome.cropped_out, 1);
        assert_eq!(outcome.cloud.len(), 2);
        assert!(outcome.centroid.x < 0.1);
    }

    #[test]
    fn test_empty_observation() {
        let err = fuse_views(ObjectRole::Parent, &[], &wide_bounds(), 0.2).unwrap_err();
        assert_eq!(
            err,
            FusionError::EmptyObservation {
                role: ObjectRole::Parent
            }
        );

        // Views that exist but crop to nothing are also an empty observation.
        let outside = PointCloud::from_points(vec![Point3::new(50.0, 0.0, 0.0)]);
        let bounds = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let err = fuse_views(ObjectRole::Child, &[outside], &bounds, 0.2).unwrap_err();
        assert!(matches!(err, FusionError::EmptyObservation { .. }));
    }

    #[test]
    fn test_invalid_radius() {
        let cloud = PointCloud::from_points(vec![Point3::origin()]);
        assert!(matches!(
            fuse_views(ObjectRole::Child, &[cloud], &wide_bounds(), 0.0),
            Err(FusionError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn test_filter_anchors_on_centroid_of_all_points() {
        // Centroid of all four points sits at x = 0.1875, so the point at
        // 0.3 survives while the one at 0.45 is rejected. Anchoring on the
        // dense cluster instead would have dropped both.
        let cloud = PointCloud::from_points(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.3, 0.0, 0.0),
            Point3::new(0.45, 0.0, 0.0),
        ]);
        let outcome = fuse_views(ObjectRole::Child, &[cloud], &wide_bounds(), 0.2).unwrap();
        assert_eq!(outcome.cloud.len(), 3);
        assert_eq!(outcome.outliers_removed, 1);
    }
}
