//! Validation-pipeline configuration.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cloud::Aabb;
use crate::error::{PlacementError, Result};

/// Numeric knobs of the placement-validation pipeline.
///
/// Defaults match the values the demonstration generator was tuned with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationConfig {
    /// Points farther than this from the fused cloud's centroid are
    /// discarded as outliers (length units).
    pub outlier_radius: f64,
    /// Vertical clearance added to the flipped parent pose so it does not
    /// interpenetrate the table (length units).
    pub upside_down_clearance: f64,
    /// Maximum angle between an object's upright body axis and world-up
    /// for orientation criteria (radians).
    pub upright_angle_tolerance: f64,
    /// Wall-clock settle window granted to the simulator after pose
    /// resets (seconds).
    pub settle_time: f64,
    /// Workspace bound applied to each per-camera point set before fusion.
    pub crop_bounds: Aabb,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            outlier_radius: 0.2,
            upside_down_clearance: 0.15,
            upright_angle_tolerance: 15.0_f64.to_radians(),
            settle_time: 0.5,
            crop_bounds: Aabb::new(Point3::new(0.0, -0.6, 0.9), Point3::new(0.8, 0.6, 1.6)),
        }
    }
}

impl ValidationConfig {
    /// Sets the outlier radius.
    #[must_use]
    pub const fn with_outlier_radius(mut self, radius: f64) -> Self {
        self.outlier_radius = radius;
        self
    }

    /// Sets the upside-down clearance.
    #[must_use]
    pub const fn with_upside_down_clearance(mut self, clearance: f64) -> Self {
        self.upside_down_clearance = clearance;
        self
    }

    /// Sets the upright angle tolerance (radians).
    #[must_use]
    pub const fn with_upright_angle_tolerance(mut self, tolerance: f64) -> Self {
        self.upright_angle_tolerance = tolerance;
        self
    }

    /// Sets the settle window (seconds).
    #[must_use]
    pub const fn with_settle_time(mut self, seconds: f64) -> Self {
        self.settle_time = seconds;
        self
    }

    /// Sets the fusion crop bounds.
    #[must_use]
    pub const fn with_crop_bounds(mut self, bounds: Aabb) -> Self {
        self.crop_bounds = bounds;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// [`PlacementError::InvalidConfig`] when a value is non-finite,
    /// non-positive, or the crop bound is inverted.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("outlier_radius", self.outlier_radius),
            ("upside_down_clearance", self.upside_down_clearance),
            ("upright_angle_tolerance", self.upright_angle_tolerance),
            ("settle_time", self.settle_time),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlacementError::invalid_config(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if !self.crop_bounds.is_valid() {
            return Err(PlacementError::invalid_config("crop_bounds is inverted"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = ValidationConfig::default();
        assert_relative_eq!(config.outlier_radius, 0.2);
        assert_relative_eq!(config.upside_down_clearance, 0.15);
        assert_relative_eq!(config.upright_angle_tolerance, 15.0_f64.to_radians());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_nonpositive() {
        let config = ValidationConfig::default().with_outlier_radius(0.0);
        assert!(config.validate().is_err());

        let config = ValidationConfig::default().with_settle_time(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let config = ValidationConfig::default().with_crop_bounds(Aabb::new(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
        ));
        assert!(config.validate().is_err());
    }
}
