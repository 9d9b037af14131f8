//! Core types for relational-placement validation.
//!
//! This crate provides the foundational vocabulary shared by the sensing,
//! simulation and validation layers:
//!
//! - [`RigidPose`] - position + unit-quaternion orientation, validated at
//!   construction
//! - [`convert_reference_frame`] - the single frame-conversion primitive
//!   every piece of placement geometry reduces to
//! - [`PointCloud`] / [`Aabb`] - fused observation geometry
//! - [`ObjectClass`] / [`ObjectRole`] / [`ObjectObservation`] - object
//!   identity and the immutable per-trial sensing snapshot
//! - [`ValidationConfig`] - pipeline configuration with stated defaults
//!
//! # Design Philosophy
//!
//! These types are **pure data and pure math**. They have no simulator
//! handles, no I/O, and no shared mutable state, so every geometric
//! decision in the pipeline can be tested without a physics engine
//! present.
//!
//! # Coordinate Conventions
//!
//! Right-handed, Z up. `compose(a, b) = a ∘ b` applies `b` within `a`'s
//! frame; the convention is fixed here and never swapped downstream.
//!
//! # Example
//!
//! ```
//! use placement_types::{convert_reference_frame, RigidPose};
//! use nalgebra::Point3;
//!
//! let child = RigidPose::from_position(Point3::new(0.0, 0.0, 0.1));
//! let same = convert_reference_frame(&child, &child, &child);
//! assert!((same.position.z - 0.1).abs() < 1e-12);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_const_for_fn, clippy::missing_errors_doc)]

mod cloud;
mod config;
mod error;
mod frames;
mod object;
mod pose;

pub use cloud::{Aabb, PointCloud};
pub use config::ValidationConfig;
pub use error::{PlacementError, Result};
pub use frames::convert_reference_frame;
pub use object::{
    LoadPoseType, MeshReference, ObjectClass, ObjectObservation, ObjectRole, PerRole, ScaleRange,
};
pub use pose::{RigidPose, UNIT_TOLERANCE};

// Re-export math types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
