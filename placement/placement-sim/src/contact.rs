//! Contact query results.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::body::BodyId;

/// One contact point reported by the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactPoint {
    /// First body in contact.
    pub body_a: BodyId,
    /// Second body in contact.
    pub body_b: BodyId,
    /// Contact location in world coordinates.
    pub position: Point3<f64>,
    /// Contact normal, pointing from `body_a` to `body_b`.
    pub normal: Vector3<f64>,
    /// Penetration depth (positive when overlapping).
    pub depth: f64,
}

impl ContactPoint {
    /// Creates a contact between two bodies.
    #[must_use]
    pub const fn new(
        body_a: BodyId,
        body_b: BodyId,
        position: Point3<f64>,
        normal: Vector3<f64>,
        depth: f64,
    ) -> Self {
        Self {
            body_a,
            body_b,
            position,
            normal,
            depth,
        }
    }

    /// Whether this contact involves the given body.
    #[must_use]
    pub fn involves_body(&self, body: BodyId) -> bool {
        self.body_a == body || self.body_b == body
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_involves_body() {
        let contact = ContactPoint::new(
            BodyId::new(1),
            BodyId::new(2),
            Point3::origin(),
            Vector3::z(),
            0.001,
        );
        assert!(contact.involves_body(BodyId::new(1)));
        assert!(contact.involves_body(BodyId::new(2)));
        assert!(!contact.involves_body(BodyId::new(3)));
    }
}
