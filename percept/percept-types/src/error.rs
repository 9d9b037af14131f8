//! Error types for sensing data.

use thiserror::Error;

/// Errors from sensing capture and buffer validation.
#[derive(Debug, Error)]
pub enum PerceptError {
    /// A buffer's length does not match the frame header.
    #[error("buffer shape mismatch in {buffer}: expected {expected} elements, got {actual}")]
    BufferShapeMismatch {
        /// Which buffer is malformed.
        buffer: &'static str,
        /// Expected element count.
        expected: usize,
        /// Actual element count.
        actual: usize,
    },

    /// A camera failed to deliver a frame.
    #[error("capture failed: {reason}")]
    CaptureFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl PerceptError {
    /// Creates a capture-failure error.
    #[must_use]
    pub fn capture_failed(reason: impl Into<String>) -> Self {
        Self::CaptureFailed {
            reason: reason.into(),
        }
    }
}

/// Result type for sensing operations.
pub type Result<T> = std::result::Result<T, PerceptError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PerceptError::BufferShapeMismatch {
            buffer: "depth",
            expected: 4,
            actual: 3,
        };
        assert!(err.to_string().contains("depth"));
        assert!(PerceptError::capture_failed("camera 2 timed out")
            .to_string()
            .contains("camera 2"));
    }
}
