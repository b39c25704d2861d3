//! Canonical search report: a JSON summary of one outcome plus its digest.
//!
//! States and classes are opaque to the engine, so the report renders them
//! through `Debug`. Optimal-state descriptions are sorted so the bytes do
//! not depend on hash-set iteration order.

use std::collections::HashSet;
use std::fmt::Debug;

use serde_json::{json, Map, Value};

use crate::canon::{
    canonical_hash, canonical_json_bytes, CanonError, ContentHash, DOMAIN_SEARCH_REPORT,
};
use crate::policy::SearchPolicy;
use crate::search::{Path, SearchOutcome, SearchStats};

/// Report schema version carried in every report.
pub const REPORT_SCHEMA_VERSION: &str = "search_report.v1";

/// Serialized outcome of a search run.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Report as a JSON value.
    pub value: Value,
    /// Canonical JSON bytes of `value`.
    pub bytes: Vec<u8>,
    /// `canonical_hash(DOMAIN_SEARCH_REPORT, bytes)`.
    pub digest: ContentHash,
}

impl SearchReport {
    /// Build the report for `outcome`, optionally including the set of
    /// states on any optimal path.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the report value cannot be canonicalized.
    pub fn build<S, K>(
        outcome: &SearchOutcome<S, K>,
        policy: &SearchPolicy,
        optimal_states: Option<&HashSet<S>>,
    ) -> Result<Self, CanonError>
    where
        S: Debug,
        K: Copy + Ord + Debug,
    {
        Self::build_inner(None, outcome, policy, optimal_states)
    }

    /// Same as [`SearchReport::build`], tagged with a world identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the report value cannot be canonicalized.
    pub fn build_labeled<S, K>(
        world_id: &str,
        outcome: &SearchOutcome<S, K>,
        policy: &SearchPolicy,
        optimal_states: Option<&HashSet<S>>,
    ) -> Result<Self, CanonError>
    where
        S: Debug,
        K: Copy + Ord + Debug,
    {
        Self::build_inner(Some(world_id), outcome, policy, optimal_states)
    }

    fn build_inner<S, K>(
        world_id: Option<&str>,
        outcome: &SearchOutcome<S, K>,
        policy: &SearchPolicy,
        optimal_states: Option<&HashSet<S>>,
    ) -> Result<Self, CanonError>
    where
        S: Debug,
        K: Copy + Ord + Debug,
    {
        let mut value = json!({
            "schema_version": REPORT_SCHEMA_VERSION,
            "policy": policy_value(policy),
            "stats": stats_value(&outcome.stats),
            "path": outcome.path.as_ref().map_or(Value::Null, path_value),
        });
        if let Some(world_id) = world_id {
            value["world_id"] = Value::from(world_id);
        }
        if let Some(states) = optimal_states {
            let mut described: Vec<String> = states.iter().map(|s| format!("{s:?}")).collect();
            described.sort();
            value["optimal_states"] = json!({
                "count": described.len(),
                "states": described,
            });
        }

        let bytes = canonical_json_bytes(&value)?;
        let digest = canonical_hash(DOMAIN_SEARCH_REPORT, &bytes);
        Ok(Self {
            value,
            bytes,
            digest,
        })
    }
}

fn policy_value(policy: &SearchPolicy) -> Value {
    json!({
        "objective": policy.objective.as_str(),
        "exhaustive": policy.exhaustive,
        "max_expansions": policy.max_expansions,
        "max_branches": policy.max_branches,
    })
}

fn stats_value(stats: &SearchStats) -> Value {
    json!({
        "termination": stats.termination.as_str(),
        "expansions": stats.expansions,
        "nodes_created": stats.nodes_created,
        "reopened": stats.reopened,
        "cost_pruned": stats.cost_pruned,
        "frontier_high_water": stats.frontier_high_water,
    })
}

fn path_value<S: Debug, K: Copy + Ord + Debug>(path: &Path<S, K>) -> Value {
    let mut tally = Map::new();
    for (class, count) in path.class_tally() {
        tally.insert(format!("{class:?}"), Value::from(count));
    }
    let steps: Vec<Value> = path
        .steps()
        .iter()
        .map(|step| {
            json!({
                "state": format!("{:?}", step.state),
                "cost": step.cost,
                "class": step.class.map(|c| format!("{c:?}")),
            })
        })
        .collect();

    json!({
        "cost": path.cost(),
        "len": path.len(),
        "class_tally": tally,
        "steps": steps,
    })
}
