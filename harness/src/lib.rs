//! Waypoint Harness: reference worlds and the run pipeline for the search
//! engine.
//!
//! The harness does NOT implement search logic; it delegates to
//! `waypoint_search`. Worlds provide domain data only; the runner owns
//! orchestration and report packaging.
//!
//! # Worlds
//!
//! - [`worlds::calibration`]: operator insertion, searched under `Maximize`
//! - [`worlds::claw_machine`]: token-minimal button presses
//! - [`worlds::reindeer_maze`]: turn-weighted maze with optimal-seat count

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod error;
pub mod runner;
pub mod worlds;
