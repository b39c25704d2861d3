//! Typed search errors.
//!
//! `SearchError` covers pre-flight policy failures and enumeration budget
//! and bound failures. "No path" is never an error: it is expressed through
//! [`crate::search::TerminationReason`] and an empty `path`.

use thiserror::Error;

use crate::policy::Objective;

/// Typed failure for search validation and enumeration budgets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A policy field holds a value the engine cannot run with.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// The requested operation is only defined for another objective.
    #[error("{operation} does not support the {objective:?} objective")]
    UnsupportedObjective {
        operation: &'static str,
        objective: Objective,
    },

    /// Optimal-state enumeration forked more branches than the policy allows.
    #[error("enumeration exceeded the branch budget of {limit}")]
    BranchBudgetExceeded { limit: u64 },

    /// Enumeration was asked for paths of cost `bound` but reached a goal
    /// more cheaply, so `bound` is not the optimum.
    #[error("enumeration bound {bound} is above the optimum: a goal costs {found}")]
    BoundAboveOptimum { bound: i64, found: i64 },
}
