//! Waypoint Search: deterministic best-first (A*) search over caller-defined
//! state spaces.
//!
//! The engine knows nothing about any domain. A world supplies expansion,
//! heuristic and goal predicates through [`contract::SearchWorld`]; the
//! engine owns the open set, the state registry and path reconstruction.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_search  ←  waypoint_harness
//! (engine core)       (reference worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`frontier::OpenQueue`]: index-tracked binary heap with decrease-key
//! - [`registry::StateRegistry`]: one [`node::SearchNode`] per distinct state
//! - [`search::search`]: one optimal path, plus [`search::SearchStats`]
//! - [`enumerate::optimal_states`]: every state on any optimal path
//! - [`policy::SearchPolicy`]: objective, exhaustive mode and budgets
//! - [`report::SearchReport`]: canonical JSON summary and digest

#![forbid(unsafe_code)]

pub mod canon;
pub mod contract;
pub mod enumerate;
pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod registry;
pub mod report;
pub mod search;
