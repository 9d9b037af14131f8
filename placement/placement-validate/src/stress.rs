//! Upside-down stability stress test geometry.
//!
//! A placement can look successful merely because the proposed transform
//! happens to coincide with the child's resting contact on the table. The
//! stress test re-poses the parent upside-down, holds it fixed, and
//! re-derives the child's pose so that its relation to the parent is
//! unchanged. If gravity alone breaks the contact, the relation is a
//! genuine geometric fit; if the child stays stuck, the trial is rejected.
//!
//! Everything here is pure algebra over the immutable start-pose snapshot;
//! nothing re-simulates the original placement.

use nalgebra::{UnitQuaternion, Vector3};

use placement_types::{convert_reference_frame, ObjectClass, RigidPose};

/// The parent and child poses used for the upside-down settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressPoses {
    /// Where the parent is rigidly constrained.
    pub parent: RigidPose,
    /// Where the child is released from.
    pub child: RigidPose,
}

/// Constructs the flipped parent pose: the canonical upright orientation
/// rotated 180° about the world X axis, at the parent's start position
/// raised by `clearance` so the flipped body clears the table.
#[must_use]
pub fn upside_down_parent_pose(
    start_parent: &RigidPose,
    parent_class: ObjectClass,
    clearance: f64,
) -> RigidPose {
    let flip = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI);
    RigidPose::new(
        start_parent.position + Vector3::new(0.0, 0.0, clearance),
        flip * parent_class.upright_rotation(),
    )
}

/// Derives the stress-test poses from the start-pose snapshot and the
/// composed final child pose.
///
/// The child's relation to the parent is read off against the parent's
/// *start* pose and re-anchored on the flipped pose:
///
/// 1. `child_in_parent = convert_reference_frame(final_child,
///    start_parent, identity)`
/// 2. `child = convert_reference_frame(child_in_parent, identity,
///    upside_down_parent)`
///
/// The derivation is deterministic: identical inputs produce identical
/// poses.
#[must_use]
pub fn stress_poses(
    start_parent: &RigidPose,
    final_child: &RigidPose,
    parent_class: ObjectClass,
    clearance: f64,
) -> StressPoses {
    let parent = upside_down_parent_pose(start_parent, parent_class, clearance);
    let identity = RigidPose::identity();
    let child_in_parent = convert_reference_frame(final_child, start_parent, &identity);
    let child = convert_reference_frame(&child_in_parent, &identity, &parent);
    StressPoses { parent, child }
}
