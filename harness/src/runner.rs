//! Harness runner: search a world, optionally enumerate every optimal
//! state, and package the result as a canonical report.
//!
//! # Pipeline
//!
//! ```text
//! policy.validate() → search() → [enumerate_optimal_states(cost)]
//!   → SearchReport (canonical JSON bytes + sha256 digest)
//! ```
//!
//! Enumeration reuses the cost found by the single search, so the world is
//! searched exactly once per run.

use std::collections::HashSet;

use thiserror::Error;

use waypoint_search::canon::CanonError;
use waypoint_search::contract::SearchWorld;
use waypoint_search::enumerate::enumerate_optimal_states;
use waypoint_search::error::SearchError;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::report::SearchReport;
use waypoint_search::search::{search, WorldOutcome};

use crate::contract::ReferenceWorld;

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// Policy validation or enumeration failed.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// Report canonicalization failed.
    #[error(transparent)]
    Canon(#[from] CanonError),
}

/// Everything one run produced.
#[derive(Debug)]
pub struct WorldRun<W: SearchWorld> {
    pub outcome: WorldOutcome<W>,
    /// States on any optimal path; `None` unless enumeration was
    /// requested and a path exists.
    pub optimal_states: Option<HashSet<W::State>>,
    pub report: SearchReport,
}

/// Run `world` from `start` under `policy`.
///
/// When `enumerate` is set and a path is found, every state on any path of
/// the same cost is collected as well.
///
/// # Errors
///
/// - [`RunError::Search`] for an invalid policy, or when enumeration is
///   requested under an objective it does not support or exceeds its
///   branch budget.
/// - [`RunError::Canon`] if the report cannot be serialized.
pub fn run_world<W: SearchWorld>(
    world: &W,
    start: W::State,
    policy: &SearchPolicy,
    enumerate: bool,
) -> Result<WorldRun<W>, RunError> {
    run_inner(None, world, start, policy, enumerate)
}

/// Run a reference world with its own start state and policy.
///
/// The report carries the world identifier.
///
/// # Errors
///
/// Same as [`run_world`].
pub fn run_reference<W: ReferenceWorld>(
    world: &W,
    enumerate: bool,
) -> Result<WorldRun<W>, RunError> {
    run_inner(
        Some(world.world_id()),
        world,
        world.start(),
        &world.policy(),
        enumerate,
    )
}

fn run_inner<W: SearchWorld>(
    world_id: Option<&str>,
    world: &W,
    start: W::State,
    policy: &SearchPolicy,
    enumerate: bool,
) -> Result<WorldRun<W>, RunError> {
    let outcome = search(world, start.clone(), policy)?;

    let optimal_states = match outcome.cost() {
        Some(bound) if enumerate => Some(enumerate_optimal_states(world, start, bound, policy)?),
        _ => None,
    };

    let report = match world_id {
        Some(id) => SearchReport::build_labeled(id, &outcome, policy, optimal_states.as_ref())?,
        None => SearchReport::build(&outcome, policy, optimal_states.as_ref())?,
    };

    Ok(WorldRun {
        outcome,
        optimal_states,
        report,
    })
}
