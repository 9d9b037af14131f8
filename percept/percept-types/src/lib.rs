//! Raw sensing types for placement validation.
//!
//! This crate provides the data carried from the rendering/simulation
//! stack into point-cloud fusion:
//!
//! - [`CameraIntrinsics`] / [`CameraExtrinsics`] / [`CameraCalibration`] -
//!   pinhole calibration
//! - [`RgbdFrame`] - one camera's RGB + depth + segmentation capture
//! - [`SensingProvider`] - the multi-camera capture trait implemented by
//!   the external rendering stack
//!
//! These are **raw sensor types**: no fusion, no filtering, no object
//! semantics. The fused, per-object view lives downstream in
//! `percept-fusion`.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_const_for_fn, clippy::missing_errors_doc)]

mod camera;
mod error;
mod frame;

pub use camera::{CameraCalibration, CameraExtrinsics, CameraIntrinsics};
pub use error::{PerceptError, Result};
pub use frame::{RgbdFrame, SensingProvider};
