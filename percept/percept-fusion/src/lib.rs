//! Multi-view point-cloud fusion.
//!
//! Turns per-camera RGB-D + segmentation captures into one fused,
//! outlier-filtered point cloud per object:
//!
//! 1. [`segmented_world_points`] back-projects the pixels belonging to one
//!    body through the camera calibration into world coordinates.
//! 2. [`fuse_views`] crops each view to the workspace bound, concatenates
//!    across cameras, and drops points farther than the configured radius
//!    from the merged centroid (single pass).
//!
//! An object visible in no camera yields
//! [`FusionError::EmptyObservation`]; the trial is skipped before any
//! relative transform is composed for it.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod fuse;
mod segment;

pub use error::{FusionError, Result};
pub use fuse::{fuse_views, FusionOutcome};
pub use segment::segmented_world_points;

use percept_types::RgbdFrame;
use placement_types::{Aabb, ObjectRole};

/// Extracts and fuses one object's cloud from a full multi-camera capture.
///
/// Convenience wrapper over [`segmented_world_points`] + [`fuse_views`]
/// for callers holding raw frames and a segmentation label.
///
/// # Errors
///
/// Propagates [`FusionError`] from [`fuse_views`].
pub fn fuse_object_observation(
    role: ObjectRole,
    frames: &[RgbdFrame],
    label: u32,
    bounds: &Aabb,
    outlier_radius: f64,
) -> Result<FusionOutcome> {
    let views: Vec<_> = frames
        .iter()
        .map(|frame| segmented_world_points(frame, label))
        .collect();
    fuse_views(role, &views, bounds, outlier_radius)
}
