//! Labeled demonstration records.
//!
//! A successful trial persists a [`DemoRecord`]: both objects' start and
//! final poses and point clouds, the camera calibrations, the mesh
//! references, and the accepted relative transform. The [`RecordStore`]
//! writes one JSON file per trial index, append-only — records are never
//! overwritten or merged, so a run can resume at a later start index
//! without disturbing earlier output.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod record;
mod store;

pub use error::{RecordError, Result};
pub use record::DemoRecord;
pub use store::RecordStore;
