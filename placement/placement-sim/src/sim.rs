//! The simulator collaborator interface.

use placement_types::RigidPose;
use thiserror::Error;

use crate::body::BodyId;
use crate::contact::ContactPoint;

/// Errors reported by the simulator backend.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A body ID is not known to the simulator.
    #[error("unknown body: {0}")]
    UnknownBody(BodyId),

    /// A contact query could not be resolved (backend desync).
    #[error("contact query failed between {body_a} and {body_b}: {reason}")]
    ContactQueryFailed {
        /// First queried body.
        body_a: BodyId,
        /// Second queried body.
        body_b: BodyId,
        /// Backend-provided description.
        reason: String,
    },

    /// Any other backend failure.
    #[error("simulator backend error: {reason}")]
    Backend {
        /// Backend-provided description.
        reason: String,
    },
}

impl SimError {
    /// Creates a backend error.
    #[must_use]
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend {
            reason: reason.into(),
        }
    }
}

/// Result type for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Narrow interface to the external physics simulator.
///
/// Physics stepping, collision response and asset loading all live behind
/// this trait, so the validation pipeline can run against a scripted fake
/// in tests and a live engine in production.
pub trait Simulator {
    /// Current pose of a body.
    fn body_pose(&mut self, id: BodyId) -> Result<RigidPose>;

    /// Teleports a body to the given pose, zeroing its velocities.
    fn reset_body_pose(&mut self, id: BodyId, pose: &RigidPose) -> Result<()>;

    /// Rigidly constrains a body to the world at the given pose.
    fn set_constraint(&mut self, id: BodyId, pose: &RigidPose) -> Result<()>;

    /// Removes the world constraint on a body. A no-op when none exists.
    fn remove_constraint(&mut self, id: BodyId) -> Result<()>;

    /// Enables or disables physics stepping.
    ///
    /// Pose resets are performed with stepping disabled so no dynamics run
    /// against a torn intermediate state.
    fn set_stepping(&mut self, enabled: bool) -> Result<()>;

    /// Blocks while the simulation settles for the given wall-clock
    /// window. Only meaningful while stepping is enabled.
    fn settle(&mut self, seconds: f64) -> Result<()>;

    /// Contact points currently active between two bodies.
    fn contacts_between(&mut self, a: BodyId, b: BodyId) -> Result<Vec<ContactPoint>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::UnknownBody(BodyId::new(9));
        assert!(err.to_string().contains('9'));

        let err = SimError::ContactQueryFailed {
            body_a: BodyId::new(1),
            body_b: BodyId::new(2),
            reason: "stale broadphase".into(),
        };
        assert!(err.to_string().contains("stale broadphase"));
    }
}
