//! Placement composition with canonical upright correction.

use placement_types::{LoadPoseType, ObjectClass, RigidPose};

/// Final world poses produced by composing a proposed relative transform
/// onto the observed start poses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposedPlacement {
    /// The parent's final pose.
    pub final_parent: RigidPose,
    /// The child's final pose.
    pub final_child: RigidPose,
    /// The upright correction applied to both objects, when the parent's
    /// load policy allowed arbitrary orientation.
    pub upright_correction: Option<RigidPose>,
}

impl ComposedPlacement {
    /// Whether the parent was re-grounded to its canonical upright
    /// orientation.
    #[must_use]
    pub const fn parent_regrounded(&self) -> bool {
        self.upright_correction.is_some()
    }
}

/// Composes the proposed relative transform onto the start poses.
///
/// The child's final pose is `relative ∘ start_child`. When the parent was
/// loaded with [`LoadPoseType::AnyPose`], the parent is re-grounded to its
/// class's canonical upright orientation (position unchanged) and the same
/// correction `U = upright_parent ∘ start_parent⁻¹` is applied to the
/// child, so the relative relation between the two objects is preserved
/// exactly. Under any other policy the parent keeps its start pose.
#[must_use]
pub fn compose_placement(
    start_parent: &RigidPose,
    start_child: &RigidPose,
    relative_transform: &RigidPose,
    parent_class: ObjectClass,
    parent_policy: LoadPoseType,
) -> ComposedPlacement {
    let final_child = relative_transform.compose(start_child);

    if parent_policy == LoadPoseType::AnyPose {
        let upright_parent = start_parent.with_rotation(parent_class.upright_rotation());
        let correction = upright_parent.compose(&start_parent.inverse());
        ComposedPlacement {
            final_parent: upright_parent,
            final_child: correction.compose(&final_child),
            upright_correction: Some(correction),
        }
    } else {
        ComposedPlacement {
            final_parent: *start_parent,
            final_child,
            upright_correction: None,
        }
    }
}
