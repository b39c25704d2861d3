//! Optimal-state enumeration: every state on *some* minimum-cost path.
//!
//! A single best-first search yields one witness path. When several paths
//! tie, the states of all of them are recovered by a restart-capable search
//! over an explicit work-list of branches:
//!
//! - a branch follows edges of its own class (e.g. keeps advancing);
//! - every other surviving edge forks a fresh branch rooted at the edge's
//!   target, carrying a copy of the accumulated path;
//! - a branch that reaches a goal with cost exactly equal to the optimal
//!   bound contributes its whole path to the result set.
//!
//! Pending branches are resumed cheapest first, so the first arrival
//! recorded at a state is usually already its cheapest one. Branches never
//! revisit a state already on their own path, and are dropped once
//! `cost + heuristic` exceeds the bound or they arrive at a state strictly
//! later than an earlier branch did. The worst case is still exponential in
//! the number of class changes.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::hash::Hash;

use crate::contract::SearchWorld;
use crate::error::SearchError;
use crate::policy::{Objective, SearchPolicy};
use crate::registry::StateRegistry;
use crate::search::search;

/// One unit of work: a partial path and the class it is following.
#[derive(Debug, Clone)]
struct Branch<S, K> {
    path: Vec<S>,
    on_path: HashSet<S>,
    cost: i64,
    class: Option<K>,
}

impl<S: Clone + Eq + Hash, K: Copy> Branch<S, K> {
    fn root(start: S) -> Self {
        let mut on_path = HashSet::new();
        on_path.insert(start.clone());
        Self {
            path: vec![start],
            on_path,
            cost: 0,
            class: None,
        }
    }

    fn tip(&self) -> &S {
        // A branch is created with at least one state and only grows.
        &self.path[self.path.len() - 1]
    }

    fn contains(&self, state: &S) -> bool {
        self.on_path.contains(state)
    }

    fn advance(&mut self, target: S, cost: i64) {
        self.on_path.insert(target.clone());
        self.path.push(target);
        self.cost = cost;
    }

    fn fork(&self, target: S, cost: i64, class: K) -> Self {
        let mut child = self.clone();
        child.advance(target, cost);
        child.class = Some(class);
        child
    }
}

/// A queued branch. Ordered so that `BinaryHeap` pops the cheapest branch,
/// oldest first among equal costs.
struct Pending<S, K> {
    order: u64,
    branch: Branch<S, K>,
}

impl<S, K> PartialEq for Pending<S, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S, K> Eq for Pending<S, K> {}

impl<S, K> PartialOrd for Pending<S, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, K> Ord for Pending<S, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .branch
            .cost
            .cmp(&self.branch.cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Record an arrival at `state` with `cost`.
///
/// Returns `false` when an earlier arrival was strictly cheaper; such a
/// branch cannot lie on a minimum-cost path.
fn admit_arrival<S: Clone + Eq + Hash, K>(
    best: &mut StateRegistry<S, K>,
    state: &S,
    cost: i64,
) -> bool {
    let id = best.get_or_create(state);
    let node = best.node_mut(id);
    match node.cost {
        Some(recorded) if cost > recorded => false,
        _ => {
            node.cost = Some(cost);
            true
        }
    }
}

/// Collect every state lying on at least one minimum-cost path from
/// `start` to a goal, given that minimum cost as `bound`.
///
/// `bound` must be the optimal cost, normally the one returned by
/// [`search`]. A smaller bound yields an empty set. A larger bound is
/// rejected as soon as a cheaper goal arrival is seen, because arrivals
/// strictly worse than an earlier one are pruned and the set would be
/// incomplete. The result is a set: states shared by several optimal paths
/// appear once.
///
/// # Errors
///
/// - [`SearchError::InvalidPolicy`] if the policy fails validation.
/// - [`SearchError::UnsupportedObjective`] unless the objective is
///   [`Objective::Minimize`].
/// - [`SearchError::BranchBudgetExceeded`] if more than
///   `policy.max_branches` forks are needed.
/// - [`SearchError::BoundAboveOptimum`] if a goal is reached at a cost
///   below `bound`.
pub fn enumerate_optimal_states<W: SearchWorld>(
    world: &W,
    start: W::State,
    bound: i64,
    policy: &SearchPolicy,
) -> Result<HashSet<W::State>, SearchError> {
    preflight(policy)?;

    let mut result = HashSet::new();
    let mut best: StateRegistry<W::State, W::Class> = StateRegistry::new();
    let mut forks: u64 = 0;

    admit_arrival(&mut best, &start, 0);
    if world.heuristic(&start) > bound {
        return Ok(result);
    }
    let mut work = BinaryHeap::new();
    work.push(Pending {
        order: 0,
        branch: Branch::root(start),
    });

    while let Some(Pending { mut branch, .. }) = work.pop() {
        loop {
            let tip = branch.tip().clone();
            if world.is_goal(&tip) && (!policy.exhaustive || world.resources_consumed(&tip)) {
                if branch.cost < bound {
                    return Err(SearchError::BoundAboveOptimum {
                        bound,
                        found: branch.cost,
                    });
                }
                if branch.cost == bound {
                    result.extend(branch.path.iter().cloned());
                }
                break;
            }

            let mut next = None;
            for edge in world.expand(&tip) {
                let cost = branch.cost.saturating_add(edge.cost);
                if !world.is_cost_valid(cost) || branch.contains(&edge.target) {
                    continue;
                }
                if cost.saturating_add(world.heuristic(&edge.target)) > bound {
                    continue;
                }
                if !admit_arrival(&mut best, &edge.target, cost) {
                    continue;
                }
                if next.is_none() && branch.class == Some(edge.class) {
                    next = Some((edge.target, cost));
                    continue;
                }

                forks += 1;
                if forks > policy.max_branches {
                    return Err(SearchError::BranchBudgetExceeded {
                        limit: policy.max_branches,
                    });
                }
                #[cfg(feature = "tracing")]
                tracing::trace!(at = ?tip, to = ?edge.target, class = ?edge.class, cost, "fork");
                work.push(Pending {
                    order: forks,
                    branch: branch.fork(edge.target, cost, edge.class),
                });
            }

            match next {
                Some((target, cost)) => branch.advance(target, cost),
                None => break,
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(bound, forks, states = result.len(), "enumeration finished");

    Ok(result)
}

/// Run [`search`] for the optimal cost, then enumerate every state on an
/// optimal path.
///
/// Returns `Ok(None)` when no path exists.
///
/// # Errors
///
/// Same as [`enumerate_optimal_states`].
pub fn optimal_states<W: SearchWorld>(
    world: &W,
    start: W::State,
    policy: &SearchPolicy,
) -> Result<Option<HashSet<W::State>>, SearchError> {
    preflight(policy)?;
    let outcome = search(world, start.clone(), policy)?;
    let Some(bound) = outcome.cost() else {
        return Ok(None);
    };
    enumerate_optimal_states(world, start, bound, policy).map(Some)
}

fn preflight(policy: &SearchPolicy) -> Result<(), SearchError> {
    policy.validate()?;
    if policy.objective != Objective::Minimize {
        return Err(SearchError::UnsupportedObjective {
            operation: "optimal-state enumeration",
            objective: policy.objective,
        });
    }
    Ok(())
}
