//! Simulator interface and visualization mirroring.
//!
//! The validation pipeline never talks to a physics engine directly; it
//! goes through the [`Simulator`] trait defined here. That keeps every
//! geometric decision testable against a scripted fake, with the live
//! engine injected only at the outermost layer.
//!
//! - [`BodyId`] - simulator body identity (doubles as segmentation label)
//! - [`ContactPoint`] - contact query results
//! - [`Simulator`] - pose resets, constraints, stepping, settling,
//!   contact queries
//! - [`StateMirror`] - background thread mirroring poses into a
//!   [`VisualizationSink`] at fixed cadence, pausable around
//!   mutation-sensitive windows

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod body;
mod contact;
mod mirror;
mod sim;

pub use body::BodyId;
pub use contact::ContactPoint;
pub use mirror::{PauseGuard, PoseSource, StateMirror, VisualizationSink};
pub use sim::{Result, SimError, Simulator};
