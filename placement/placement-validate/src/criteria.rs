//! Success criteria and their aggregation.

use std::collections::BTreeMap;

use nalgebra::Vector3;

use placement_types::RigidPose;

/// Child and parent are in surface contact after the placement settles.
pub const TOUCHING_SURF: &str = "touching_surf";
/// The child separated from the flipped parent under gravity.
pub const FELL_OFF_UPSIDE_DOWN: &str = "fell_off_upside_down";
/// The bottle stands upright inside the container.
pub const BOTTLE_UPRIGHT: &str = "bottle_upright";

/// One named success criterion: a pass flag, optionally backed by the
/// scalar it was thresholded from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criterion {
    /// Whether the criterion passed.
    pub passed: bool,
    /// The underlying measurement, when there is one (e.g. an angle in
    /// radians).
    pub measurement: Option<f64>,
}

impl Criterion {
    /// A purely boolean criterion.
    #[must_use]
    pub const fn boolean(passed: bool) -> Self {
        Self {
            passed,
            measurement: None,
        }
    }

    /// A criterion thresholded from a measurement.
    #[must_use]
    pub const fn measured(passed: bool, measurement: f64) -> Self {
        Self {
            passed,
            measurement: Some(measurement),
        }
    }
}

/// The criteria populated for one trial, keyed by name.
///
/// Which criteria are present varies by object-class pair: class-specific
/// checks simply never appear for other pairs, and the aggregate is the
/// AND over whatever is present — absent criteria do not participate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriteriaSet {
    criteria: BTreeMap<String, Criterion>,
}

impl CriteriaSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a criterion.
    pub fn insert(&mut self, name: impl Into<String>, criterion: Criterion) {
        self.criteria.insert(name.into(), criterion);
    }

    /// Looks up a criterion by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Criterion> {
        self.criteria.get(name)
    }

    /// Number of criteria present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Whether no criteria are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Iterates criteria in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Criterion)> {
        self.criteria.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Logical AND over every criterion present (vacuously true when
    /// empty).
    #[must_use]
    pub fn aggregate(&self) -> bool {
        self.criteria.values().all(|c| c.passed)
    }
}

/// Evaluates an upright-orientation criterion: the angle between a body
/// axis mapped through `pose` and world-up, thresholded at `tolerance`
/// radians. The measurement is the angle itself.
#[must_use]
pub fn upright_criterion(pose: &RigidPose, body_axis: &Vector3<f64>, tolerance: f64) -> Criterion {
    let world_axis = pose.transform_vector(body_axis);
    let angle = world_axis.angle(&Vector3::z());
    Criterion::measured(angle < tolerance, angle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;
    use placement_types::Point3;

    #[test]
    fn test_aggregate_ands_present_criteria() {
        let mut set = CriteriaSet::new();
        set.insert(TOUCHING_SURF, Criterion::boolean(true));
        set.insert(FELL_OFF_UPSIDE_DOWN, Criterion::boolean(true));
        assert!(set.aggregate());

        set.insert(BOTTLE_UPRIGHT, Criterion::measured(false, 0.6));
        assert!(!set.aggregate());
    }

    #[test]
    fn test_absent_criteria_do_not_participate() {
        // A pair without class-specific checks only carries the two
        // built-ins; nothing else is consulted.
        let mut set = CriteriaSet::new();
        set.insert(TOUCHING_SURF, Criterion::boolean(true));
        set.insert(FELL_OFF_UPSIDE_DOWN, Criterion::boolean(true));
        assert!(set.get(BOTTLE_UPRIGHT).is_none());
        assert!(set.aggregate());
    }

    #[test]
    fn test_empty_set_is_vacuously_true() {
        assert!(CriteriaSet::new().aggregate());
    }

    #[test]
    fn test_upright_criterion_passes_when_aligned() {
        // Body Y mapped to world-up by a roll of π/2.
        let pose = RigidPose::new(
            Point3::origin(),
            UnitQuaternion::from_euler_angles(std::f64::consts::FRAC_PI_2, 0.0, 0.0),
        );
        let criterion = upright_criterion(&pose, &Vector3::y(), 15.0_f64.to_radians());
        assert!(criterion.passed);
        assert_relative_eq!(criterion.measurement.unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_upright_criterion_fails_when_tipped() {
        // Tipped 30° past upright exceeds a 15° tolerance.
        let tipped = std::f64::consts::FRAC_PI_2 + 30.0_f64.to_radians();
        let pose = RigidPose::new(
            Point3::origin(),
            UnitQuaternion::from_euler_angles(tipped, 0.0, 0.0),
        );
        let criterion = upright_criterion(&pose, &Vector3::y(), 15.0_f64.to_radians());
        assert!(!criterion.passed);
        assert_relative_eq!(
            criterion.measurement.unwrap(),
            30.0_f64.to_radians(),
            epsilon = 1e-9
        );
    }
}
