//! Placement validation pipeline.
//!
//! Validates proposed parent/child spatial relations by simulating the
//! candidate placement and testing whether it is physically stable and
//! geometrically plausible:
//!
//! 1. [`compose_placement`] applies the proposed relative transform to the
//!    observed start poses, re-grounding arbitrarily oriented parents to
//!    their canonical upright orientation.
//! 2. After an external settle, the first evaluation pass records contact
//!    and class-specific orientation criteria.
//! 3. [`stress_poses`] derives the upside-down robustness test purely from
//!    algebra over the start-pose snapshot: parent flipped and held fixed,
//!    child re-anchored so its relation to the parent is unchanged.
//! 4. The second, gating evaluation pass ANDs every criterion present and
//!    updates the [`RunningStatistics`].
//! 5. Successful trials yield a demonstration payload for the record
//!    store.
//!
//! [`run_trial`] runs steps 1–5 for one trial against any [`Simulator`]
//! implementation; [`run_trials`] drives the full sense → fuse → propose →
//! validate loop.
//!
//! [`Simulator`]: placement_sim::Simulator

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod compose;
mod criteria;
mod error;
mod proposer;
mod runner;
mod setup;
mod stats;
mod stress;
mod trial;

pub use compose::{compose_placement, ComposedPlacement};
pub use criteria::{
    upright_criterion, CriteriaSet, Criterion, BOTTLE_UPRIGHT, FELL_OFF_UPSIDE_DOWN, TOUCHING_SURF,
};
pub use error::{ProposerError, Result, TrialError};
pub use proposer::{RelationProposal, RelationProposer};
pub use runner::{
    run_trials, RunConfig, SceneStager, StagedObject, TrialOutcome, TrialSummary,
};
pub use setup::{container_fit_rescale, sample_mesh_scale, sample_start_pose, SampleRegion};
pub use stats::RunningStatistics;
pub use stress::{stress_poses, upside_down_parent_pose, StressPoses};
pub use trial::{run_trial, TrialInputs, TrialResult};
