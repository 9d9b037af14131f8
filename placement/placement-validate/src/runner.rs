//! The iteration loop driving trials end to end.
//!
//! A single logical thread owns the loop: stage objects, sense, fuse,
//! propose, validate, persist, tear down. The visualization mirror (when
//! present) is paused around the mutation-sensitive windows — staging and
//! teardown — so it never observes a half-built scene. A discarded trial
//! is reported with its reason and the loop moves on; nothing is retried.

use tracing::{info, warn};

use percept_fusion::fuse_object_observation;
use percept_types::{RgbdFrame, SensingProvider};
use placement_record::RecordStore;
use placement_sim::{BodyId, SimError, StateMirror, Simulator};
use placement_types::{
    LoadPoseType, MeshReference, ObjectClass, ObjectObservation, ObjectRole, PerRole,
    ValidationConfig,
};

use crate::error::Result;
use crate::proposer::RelationProposer;
use crate::stats::RunningStatistics;
use crate::trial::{run_trial, TrialInputs, TrialResult};

/// One object as staged into the simulator for a trial.
#[derive(Debug, Clone)]
pub struct StagedObject {
    /// The simulator body.
    pub body: BodyId,
    /// Object class.
    pub class: ObjectClass,
    /// Load-pose policy the object was placed with.
    pub policy: LoadPoseType,
    /// Mesh asset and scale it was loaded from.
    pub mesh: MeshReference,
}

/// Loads and removes trial objects in the external simulator.
///
/// Asset selection, mesh decomposition and URDF loading all live behind
/// this trait.
pub trait SceneStager {
    /// Stages a parent/child pair for the given iteration.
    ///
    /// # Errors
    ///
    /// [`SimError`] when the scene cannot be built.
    fn stage(&mut self, iteration: usize) -> std::result::Result<PerRole<StagedObject>, SimError>;

    /// Removes a previously staged pair.
    ///
    /// # Errors
    ///
    /// [`SimError`] when removal fails.
    fn clear(&mut self, staged: PerRole<StagedObject>) -> std::result::Result<(), SimError>;
}

/// Loop bounds and validation settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// First iteration index (supports resuming part-way).
    pub start_iteration: usize,
    /// Number of iterations to attempt.
    pub num_iterations: usize,
    /// Validation pipeline settings.
    pub validation: ValidationConfig,
}

/// How one iteration ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    /// The trial ran to completion and was counted.
    Completed {
        /// Aggregate success.
        success: bool,
    },
    /// The trial was discarded and excluded from statistics.
    Discarded {
        /// Reason string reported to the user.
        reason: String,
    },
}

/// Per-iteration summary returned by [`run_trials`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialSummary {
    /// Iteration index.
    pub iteration: usize,
    /// Outcome.
    pub outcome: TrialOutcome,
}

/// Drives `config.num_iterations` trials, returning one summary per
/// iteration.
///
/// Successful trials are persisted into `store` (when provided) under
/// their iteration index. Errors discard the affected trial and continue;
/// the run only stops at the configured bound or process interrupt.
#[allow(clippy::too_many_arguments)]
pub fn run_trials<S, C, P, G>(
    sim: &mut S,
    sensing: &mut C,
    proposer: &mut P,
    stager: &mut G,
    store: Option<&RecordStore>,
    mirror: Option<&StateMirror>,
    config: &RunConfig,
    stats: &mut RunningStatistics,
) -> Vec<TrialSummary>
where
    S: Simulator,
    C: SensingProvider,
    P: RelationProposer,
    G: SceneStager,
{
    let mut summaries = Vec::with_capacity(config.num_iterations);
    let end = config.start_iteration + config.num_iterations;
    for iteration in config.start_iteration..end {
        let staged = {
            let _pause = mirror.map(StateMirror::pause_scope);
            match stager.stage(iteration) {
                Ok(staged) => staged,
                Err(err) => {
                    warn!(iteration, reason = %err, "failed to stage trial, skipping");
                    summaries.push(TrialSummary {
                        iteration,
                        outcome: TrialOutcome::Discarded {
                            reason: err.to_string(),
                        },
                    });
                    continue;
                }
            }
        };

        let outcome =
            match run_one(sim, sensing, proposer, &staged, store, config, iteration, stats) {
                Ok(result) => TrialOutcome::Completed {
                    success: result.success,
                },
                Err(err) => {
                    let reason = err.discard_reason();
                    warn!(iteration, reason = %reason, "trial discarded");
                    TrialOutcome::Discarded { reason }
                }
            };
        summaries.push(TrialSummary { iteration, outcome });

        {
            let _pause = mirror.map(StateMirror::pause_scope);
            if let Err(err) = stager.clear(staged) {
                warn!(iteration, reason = %err, "failed to clear trial scene");
            }
        }
    }
    info!(
        completed = stats.count(),
        successes = stats.successes(),
        success_rate = stats.success_rate(),
        "trial loop finished"
    );
    summaries
}

/// Senses, fuses, proposes and validates a single staged trial.
#[allow(clippy::too_many_arguments)]
fn run_one<S, C, P>(
    sim: &mut S,
    sensing: &mut C,
    proposer: &mut P,
    staged: &PerRole<StagedObject>,
    store: Option<&RecordStore>,
    config: &RunConfig,
    iteration: usize,
    stats: &mut RunningStatistics,
) -> Result<TrialResult>
where
    S: Simulator,
    C: SensingProvider,
    P: RelationProposer,
{
    let frames = sensing.capture()?;
    let observations = PerRole::new(
        observe_role(sim, &frames, staged, ObjectRole::Parent, &config.validation)?,
        observe_role(sim, &frames, staged, ObjectRole::Child, &config.validation)?,
    );

    let proposal = proposer.propose(&observations.parent, &observations.child)?;

    let inputs = TrialInputs {
        iteration,
        bodies: PerRole::new(staged.parent.body, staged.child.body),
        policies: PerRole::new(staged.parent.policy, staged.child.policy),
        proposed_transform: proposal.relative_transform,
        part_poses: proposal.part_poses,
        cameras: frames.iter().map(RgbdFrame::calibration).collect(),
        observations,
    };

    let result = run_trial(&inputs, &config.validation, sim, stats)?;
    if let (Some(store), Some(record)) = (store, result.record.as_ref()) {
        store.write(iteration, record)?;
    }
    Ok(result)
}

/// Builds one role's observation from the captured frames.
fn observe_role<S: Simulator>(
    sim: &mut S,
    frames: &[RgbdFrame],
    staged: &PerRole<StagedObject>,
    role: ObjectRole,
    config: &ValidationConfig,
) -> Result<ObjectObservation> {
    let object = staged.get(role);
    let start_pose = sim.body_pose(object.body)?;
    let fusion = fuse_object_observation(
        role,
        frames,
        object.body.segmentation_label(),
        &config.crop_bounds,
        config.outlier_radius,
    )?;
    Ok(ObjectObservation {
        role,
        class: object.class,
        cloud: fusion.cloud,
        start_pose,
        mesh: object.mesh.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::trial::tests::{ScriptedSim, CHILD, PARENT};
    use nalgebra::Point3;
    use percept_types::{CameraExtrinsics, CameraIntrinsics, PerceptError};
    use placement_types::{Aabb, RigidPose};

    struct TwoBodySensing {
        /// When set, the parent label is absent from every frame.
        hide_parent: bool,
    }

    impl SensingProvider for TwoBodySensing {
        fn capture(&mut self) -> percept_types::Result<Vec<RgbdFrame>> {
            let parent_label = if self.hide_parent { 0 } else { PARENT.segmentation_label() };
            Ok(vec![RgbdFrame {
                rgb: vec![0; 4 * 3],
                depth: vec![1.0; 4],
                segmentation: vec![
                    parent_label,
                    CHILD.segmentation_label(),
                    0,
                    0,
                ],
                width: 2,
                height: 2,
                intrinsics: CameraIntrinsics::ideal(1.0, 2, 2),
                extrinsics: CameraExtrinsics::new(RigidPose::identity()),
                min_depth: 0.01,
                max_depth: 10.0,
            }])
        }
    }

    struct IdentityProposer;

    impl RelationProposer for IdentityProposer {
        fn propose(
            &mut self,
            _parent: &ObjectObservation,
            _child: &ObjectObservation,
        ) -> std::result::Result<crate::proposer::RelationProposal, crate::error::ProposerError>
        {
            Ok(crate::proposer::RelationProposal::new(RigidPose::identity()))
        }
    }

    struct FixedStager;

    impl SceneStager for FixedStager {
        fn stage(
            &mut self,
            _iteration: usize,
        ) -> std::result::Result<PerRole<StagedObject>, SimError> {
            Ok(PerRole::new(
                StagedObject {
                    body: PARENT,
                    class: ObjectClass::Rack,
                    policy: LoadPoseType::RandomUpright,
                    mesh: MeshReference::uniform("rack.obj", 1.0),
                },
                StagedObject {
                    body: CHILD,
                    class: ObjectClass::Mug,
                    policy: LoadPoseType::AnyPose,
                    mesh: MeshReference::uniform("mug.obj", 0.3),
                },
            ))
        }

        fn clear(
            &mut self,
            _staged: PerRole<StagedObject>,
        ) -> std::result::Result<(), SimError> {
            Ok(())
        }
    }

    fn wide_config() -> RunConfig {
        RunConfig {
            start_iteration: 0,
            num_iterations: 2,
            validation: ValidationConfig::default().with_crop_bounds(Aabb::new(
                Point3::new(-10.0, -10.0, -10.0),
                Point3::new(10.0, 10.0, 10.0),
            )),
        }
    }

    fn sim_with_bodies() -> ScriptedSim {
        let mut sim = ScriptedSim::new(true, false);
        sim.poses.insert(PARENT, RigidPose::identity());
        sim.poses
            .insert(CHILD, RigidPose::from_position(Point3::new(0.0, 0.0, 0.1)));
        sim
    }

    #[test]
    fn test_loop_runs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        let mut sim = sim_with_bodies();
        let mut sensing = TwoBodySensing { hide_parent: false };
        let mut proposer = IdentityProposer;
        let mut stager = FixedStager;
        let mut stats = RunningStatistics::new();

        let summaries = run_trials(
            &mut sim,
            &mut sensing,
            &mut proposer,
            &mut stager,
            Some(&store),
            None,
            &wide_config(),
            &mut stats,
        );

        assert_eq!(summaries.len(), 2);
        for (i, summary) in summaries.iter().enumerate() {
            assert_eq!(summary.iteration, i);
            assert_eq!(summary.outcome, TrialOutcome::Completed { success: true });
        }
        assert_eq!(stats.count(), 2);
        assert_eq!(stats.successes(), 2);
        assert!(store.contains(0));
        assert!(store.contains(1));
    }

    #[test]
    fn test_missing_observation_skips_without_counting() {
        let mut sim = sim_with_bodies();
        let mut sensing = TwoBodySensing { hide_parent: true };
        let mut proposer = IdentityProposer;
        let mut stager = FixedStager;
        let mut stats = RunningStatistics::new();
        let config = RunConfig {
            num_iterations: 1,
            ..wide_config()
        };

        let summaries = run_trials(
            &mut sim,
            &mut sensing,
            &mut proposer,
            &mut stager,
            None,
            None,
            &config,
            &mut stats,
        );

        assert_eq!(summaries.len(), 1);
        assert!(matches!(
            &summaries[0].outcome,
            TrialOutcome::Discarded { reason } if reason.contains("parent")
        ));
        // Discarded trials advance the iteration but not the statistics.
        assert_eq!(stats.count(), 0);
    }

    #[test]
    fn test_start_iteration_offsets_record_indices() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        let mut sim = sim_with_bodies();
        let mut sensing = TwoBodySensing { hide_parent: false };
        let mut proposer = IdentityProposer;
        let mut stager = FixedStager;
        let mut stats = RunningStatistics::new();
        let config = RunConfig {
            start_iteration: 5,
            num_iterations: 1,
            ..wide_config()
        };

        let summaries = run_trials(
            &mut sim,
            &mut sensing,
            &mut proposer,
            &mut stager,
            Some(&store),
            None,
            &config,
            &mut stats,
        );

        assert_eq!(summaries[0].iteration, 5);
        assert!(store.contains(5));
        assert!(!store.contains(0));
    }

    #[test]
    fn test_capture_failure_discards_trial() {
        struct FailingSensing;
        impl SensingProvider for FailingSensing {
            fn capture(&mut self) -> percept_types::Result<Vec<RgbdFrame>> {
                Err(PerceptError::capture_failed("camera offline"))
            }
        }

        let mut sim = sim_with_bodies();
        let mut sensing = FailingSensing;
        let mut proposer = IdentityProposer;
        let mut stager = FixedStager;
        let mut stats = RunningStatistics::new();
        let config = RunConfig {
            num_iterations: 1,
            ..wide_config()
        };

        let summaries = run_trials(
            &mut sim,
            &mut sensing,
            &mut proposer,
            &mut stager,
            None,
            None,
            &config,
            &mut stats,
        );

        assert!(matches!(
            &summaries[0].outcome,
            TrialOutcome::Discarded { reason } if reason.contains("camera offline")
        ));
        assert_eq!(stats.count(), 0);
    }
}
