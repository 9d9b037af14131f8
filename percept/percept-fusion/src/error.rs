//! Error types for point-cloud fusion.

use placement_types::ObjectRole;
use thiserror::Error;

/// Errors from multi-view fusion.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FusionError {
    /// The object was not visible in any camera.
    ///
    /// Trials with a missing observation are skipped before any transform
    /// is composed; they count as neither success nor failure.
    #[error("empty observation: {role} object visible in no camera")]
    EmptyObservation {
        /// Which object is missing.
        role: ObjectRole,
    },

    /// Outlier radius was not a positive finite value.
    #[error("invalid outlier radius: {radius}")]
    InvalidRadius {
        /// The offending radius.
        radius: f64,
    },
}

/// Result type for fusion operations.
pub type Result<T> = std::result::Result<T, FusionError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_role() {
        let err = FusionError::EmptyObservation {
            role: ObjectRole::Parent,
        };
        assert!(err.to_string().contains("parent"));
    }
}
