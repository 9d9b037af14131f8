//! Error taxonomy of the trial pipeline.

use thiserror::Error;

use percept_fusion::FusionError;
use percept_types::PerceptError;
use placement_record::RecordError;
use placement_sim::SimError;
use placement_types::PlacementError;

/// Why a trial was discarded instead of completing.
///
/// No variant is ever downgraded to a success; every discarded trial
/// advances the iteration counter but is excluded from the running
/// statistics.
#[derive(Debug, Error)]
pub enum TrialError {
    /// Frame-algebra input was malformed. Fatal to this trial; not
    /// retried.
    #[error(transparent)]
    Pose(#[from] PlacementError),

    /// An object was visible in no camera; the trial is skipped before a
    /// transform is composed for it.
    #[error(transparent)]
    Observation(#[from] FusionError),

    /// Sensing capture failed.
    #[error(transparent)]
    Sensing(#[from] PerceptError),

    /// The stress-test contact query could not be resolved (simulator
    /// desync).
    #[error("stress test inconclusive: {reason}")]
    StressTestInconclusive {
        /// Backend-provided description.
        reason: String,
    },

    /// Simulator failure outside the stress-test contact query.
    #[error(transparent)]
    Simulator(#[from] SimError),

    /// The relation proposer failed to produce a transform.
    #[error(transparent)]
    Proposer(#[from] ProposerError),

    /// Record persistence failure.
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl TrialError {
    /// Human-readable reason string reported for the discarded trial.
    #[must_use]
    pub fn discard_reason(&self) -> String {
        self.to_string()
    }
}

/// Failure of the external relation-inference collaborator.
#[derive(Debug, Error)]
#[error("relation proposal failed: {reason}")]
pub struct ProposerError {
    /// Proposer-provided description.
    pub reason: String,
}

impl ProposerError {
    /// Creates a proposer error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Result type for trial operations.
pub type Result<T> = std::result::Result<T, TrialError>;
