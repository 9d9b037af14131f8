//! The relation-inference collaborator interface.

use std::collections::BTreeMap;

use placement_types::{ObjectObservation, RigidPose};

use crate::error::ProposerError;

/// A proposed relative transform and its auxiliary metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationProposal {
    /// Transform mapping the child's start pose to its proposed final
    /// pose.
    pub relative_transform: RigidPose,
    /// Part-pose metadata produced alongside the proposal, opaque to the
    /// validation pipeline and carried into the record verbatim.
    pub part_poses: BTreeMap<String, RigidPose>,
}

impl RelationProposal {
    /// A proposal with no part-pose metadata.
    #[must_use]
    pub fn new(relative_transform: RigidPose) -> Self {
        Self {
            relative_transform,
            part_poses: BTreeMap::new(),
        }
    }
}

/// Proposes candidate spatial relations from fused observations.
///
/// Implemented outside this workspace (procedural generation, learned
/// models); the pipeline only validates what it proposes.
pub trait RelationProposer {
    /// Proposes a relative transform for this parent/child pair.
    ///
    /// # Errors
    ///
    /// [`ProposerError`] when no relation can be produced.
    fn propose(
        &mut self,
        parent: &ObjectObservation,
        child: &ObjectObservation,
    ) -> Result<RelationProposal, ProposerError>;
}
