//! Reference-frame conversion.
//!
//! Every piece of placement and stress-test geometry reduces to one
//! primitive: re-anchoring a pose from one frame onto another. Keeping the
//! convention in a single function avoids the classic frame-composition
//! sign errors.

use crate::pose::RigidPose;

/// Re-expresses `pose_source` from one reference frame to another.
///
/// Returns the pose that stands in the same relation to
/// `pose_frame_target` as `pose_source` stands to `pose_frame_source`:
///
/// ```text
/// result = pose_frame_target ∘ (pose_frame_source⁻¹ ∘ pose_source)
/// ```
///
/// Converting against the same frame twice is the identity:
/// `convert_reference_frame(p, f, f) == p` for any frame `f`.
///
/// # Example
///
/// ```
/// use placement_types::{convert_reference_frame, RigidPose};
/// use nalgebra::Point3;
///
/// let world_pose = RigidPose::from_position(Point3::new(0.5, 0.0, 1.0));
/// let parent = RigidPose::from_position(Point3::new(0.5, 0.0, 0.9));
///
/// // The pose in the parent's local frame.
/// let local = convert_reference_frame(&world_pose, &parent, &RigidPose::identity());
/// assert!((local.position.z - 0.1).abs() < 1e-12);
///
/// // Re-anchoring onto the parent again recovers the world pose.
/// let back = convert_reference_frame(&local, &RigidPose::identity(), &parent);
/// assert!((back.position.z - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn convert_reference_frame(
    pose_source: &RigidPose,
    pose_frame_source: &RigidPose,
    pose_frame_target: &RigidPose,
) -> RigidPose {
    pose_frame_target.compose(&pose_frame_source.inverse().compose(pose_source))
}
