//! The per-trial validation pipeline.

use std::collections::BTreeMap;

use tracing::{debug, info};

use percept_fusion::FusionError;
use percept_types::CameraCalibration;
use placement_record::DemoRecord;
use placement_sim::{BodyId, SimError, Simulator};
use placement_types::{
    LoadPoseType, ObjectClass, ObjectObservation, ObjectRole, PerRole, RigidPose, ValidationConfig,
};

use crate::compose::{compose_placement, ComposedPlacement};
use crate::criteria::{
    upright_criterion, CriteriaSet, Criterion, BOTTLE_UPRIGHT, FELL_OFF_UPSIDE_DOWN, TOUCHING_SURF,
};
use crate::error::{Result, TrialError};
use crate::stats::RunningStatistics;
use crate::stress::stress_poses;

/// Everything a single trial consumes.
///
/// The observations are the immutable sensing snapshot taken before any
/// trial mutation; both the composer and the stress test read start poses
/// from here, never from live simulator state.
#[derive(Debug, Clone)]
pub struct TrialInputs {
    /// Trial index within the run.
    pub iteration: usize,
    /// Fused observations per role.
    pub observations: PerRole<ObjectObservation>,
    /// Simulator bodies per role.
    pub bodies: PerRole<BodyId>,
    /// Load-pose policy per role.
    pub policies: PerRole<LoadPoseType>,
    /// The proposed relative transform from the relation proposer.
    pub proposed_transform: RigidPose,
    /// Opaque part-pose metadata from the proposer, carried into the
    /// record.
    pub part_poses: BTreeMap<String, RigidPose>,
    /// Calibration of the cameras that produced the observations.
    pub cameras: Vec<CameraCalibration>,
}

/// Outcome of one completed trial.
#[derive(Debug, Clone)]
pub struct TrialResult {
    /// Trial index within the run.
    pub iteration: usize,
    /// Aggregate success across both evaluation passes.
    pub success: bool,
    /// Every criterion evaluated for this trial.
    pub criteria: CriteriaSet,
    /// Final world poses per role.
    pub final_poses: PerRole<RigidPose>,
    /// Demonstration payload, present iff the trial succeeded.
    pub record: Option<DemoRecord>,
}

/// Runs the full validation pipeline for one trial.
///
/// Stages: compose the placement (with upright correction when the parent
/// was loaded at an arbitrary orientation), re-ground it in the simulator
/// and settle, evaluate the first criteria pass, run the upside-down
/// stress test, evaluate the second (gating) pass, update the statistics,
/// and build the demonstration payload on success.
///
/// # Errors
///
/// [`TrialError`] for discarded trials: malformed poses, missing
/// observations, inconclusive stress tests, or simulator failures. The
/// statistics are untouched on any error path.
pub fn run_trial<S: Simulator>(
    inputs: &TrialInputs,
    config: &ValidationConfig,
    sim: &mut S,
    stats: &mut RunningStatistics,
) -> Result<TrialResult> {
    config.validate()?;
    for role in [ObjectRole::Parent, ObjectRole::Child] {
        if inputs.observations.get(role).cloud.is_empty() {
            return Err(FusionError::EmptyObservation { role }.into());
        }
    }

    let parent = &inputs.observations.parent;
    let child = &inputs.observations.child;

    let placement = compose_placement(
        &parent.start_pose,
        &child.start_pose,
        &inputs.proposed_transform,
        parent.class,
        inputs.policies.parent,
    );
    debug!(
        iteration = inputs.iteration,
        regrounded = placement.parent_regrounded(),
        "composed placement"
    );

    let mut criteria = CriteriaSet::new();
    settle_placement(sim, inputs, &placement, config)?;
    evaluate_placement(sim, inputs, config, &mut criteria)?;
    let first_pass = criteria.aggregate();
    debug!(
        iteration = inputs.iteration,
        passed = first_pass,
        "placement criteria evaluated"
    );

    run_stress_test(sim, inputs, &placement, config, &mut criteria)?;

    let success = criteria.aggregate();
    stats.record(success);
    info!(
        iteration = inputs.iteration,
        success,
        success_rate = stats.success_rate(),
        parent = parent.class.as_str(),
        child = child.class.as_str(),
        "trial complete"
    );

    let final_poses = PerRole::new(placement.final_parent, placement.final_child);
    let record = success.then(|| build_record(inputs, &final_poses));

    Ok(TrialResult {
        iteration: inputs.iteration,
        success,
        criteria,
        final_poses,
        record,
    })
}

/// Re-grounds the composed placement in the simulator and lets it settle.
fn settle_placement<S: Simulator>(
    sim: &mut S,
    inputs: &TrialInputs,
    placement: &ComposedPlacement,
    config: &ValidationConfig,
) -> Result<()> {
    sim.set_stepping(false)?;
    if placement.parent_regrounded() {
        sim.reset_body_pose(inputs.bodies.parent, &placement.final_parent)?;
    }
    sim.reset_body_pose(inputs.bodies.child, &placement.final_child)?;
    // World-pinned classes keep their constraint through the settle.
    if !inputs.observations.parent.class.world_fixed_while_loaded() {
        sim.remove_constraint(inputs.bodies.parent)?;
    }
    if !inputs.observations.child.class.world_fixed_while_loaded() {
        sim.remove_constraint(inputs.bodies.child)?;
    }
    sim.set_stepping(true)?;
    sim.settle(config.settle_time)?;
    Ok(())
}

/// First evaluation pass: contact and class-specific orientation criteria.
fn evaluate_placement<S: Simulator>(
    sim: &mut S,
    inputs: &TrialInputs,
    config: &ValidationConfig,
    criteria: &mut CriteriaSet,
) -> Result<()> {
    let contacts = sim.contacts_between(inputs.bodies.child, inputs.bodies.parent)?;
    criteria.insert(TOUCHING_SURF, Criterion::boolean(!contacts.is_empty()));

    let parent_class = inputs.observations.parent.class;
    let child_class = inputs.observations.child.class;
    if parent_class == ObjectClass::BoxContainer && child_class == ObjectClass::Bottle {
        let settled_child = sim.body_pose(inputs.bodies.child)?;
        criteria.insert(
            BOTTLE_UPRIGHT,
            upright_criterion(
                &settled_child,
                &child_class.upright_axis(),
                config.upright_angle_tolerance,
            ),
        );
    }
    Ok(())
}

/// Flips the parent, re-derives the child pose, settles, and records the
/// `fell_off_upside_down` criterion.
fn run_stress_test<S: Simulator>(
    sim: &mut S,
    inputs: &TrialInputs,
    placement: &ComposedPlacement,
    config: &ValidationConfig,
    criteria: &mut CriteriaSet,
) -> Result<()> {
    let parent = &inputs.observations.parent;
    let child = &inputs.observations.child;

    sim.set_stepping(false)?;
    sim.remove_constraint(inputs.bodies.parent)?;
    sim.remove_constraint(inputs.bodies.child)?;
    sim.reset_body_pose(inputs.bodies.parent, &parent.start_pose)?;
    sim.reset_body_pose(inputs.bodies.child, &child.start_pose)?;

    let stress = stress_poses(
        &parent.start_pose,
        &placement.final_child,
        parent.class,
        config.upside_down_clearance,
    );
    sim.reset_body_pose(inputs.bodies.parent, &stress.parent)?;
    sim.set_constraint(inputs.bodies.parent, &stress.parent)?;
    sim.reset_body_pose(inputs.bodies.child, &stress.child)?;
    sim.set_stepping(true)?;
    sim.settle(config.settle_time)?;

    let contacts = sim
        .contacts_between(inputs.bodies.parent, inputs.bodies.child)
        .map_err(|err| match err {
            SimError::ContactQueryFailed { reason, .. } => TrialError::StressTestInconclusive {
                reason,
            },
            other => TrialError::StressTestInconclusive {
                reason: other.to_string(),
            },
        })?;
    // Pass iff gravity alone broke the contact.
    criteria.insert(
        FELL_OFF_UPSIDE_DOWN,
        Criterion::boolean(contacts.is_empty()),
    );
    Ok(())
}

/// Builds the persisted demonstration payload for a successful trial.
fn build_record(inputs: &TrialInputs, final_poses: &PerRole<RigidPose>) -> DemoRecord {
    let parent = &inputs.observations.parent;
    let child = &inputs.observations.child;
    DemoRecord {
        success: true,
        object_classes: PerRole::new(
            parent.class.as_str().to_owned(),
            child.class.as_str().to_owned(),
        ),
        start_clouds: PerRole::new(parent.cloud.clone(), child.cloud.clone()),
        // The child's cloud moves with the accepted transform; the
        // parent's is unchanged.
        final_clouds: PerRole::new(
            parent.cloud.clone(),
            child.cloud.transformed(&inputs.proposed_transform),
        ),
        start_poses: PerRole::new(parent.start_pose, child.start_pose),
        final_poses: *final_poses,
        cameras: inputs.cameras.clone(),
        meshes: PerRole::new(parent.mesh.clone(), child.mesh.clone()),
        relative_transform: inputs.proposed_transform,
        part_poses: inputs.part_poses.clone(),
    }
}
