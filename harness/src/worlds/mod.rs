//! World implementations for the harness runner.

pub mod calibration;
pub mod claw_machine;
pub mod reindeer_maze;
