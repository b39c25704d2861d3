//! Search world contract trait.

use std::fmt::Debug;
use std::hash::Hash;

/// An implicit edge produced on demand by [`SearchWorld::expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<S, K> {
    /// The state reached by following this edge.
    pub target: S,
    /// Cost added to the accumulated cost of the source state.
    pub cost: i64,
    /// Structural class of the move (e.g. advance vs rotate).
    pub class: K,
}

impl<S, K> Edge<S, K> {
    #[must_use]
    pub fn new(target: S, cost: i64, class: K) -> Self {
        Self {
            target,
            cost,
            class,
        }
    }
}

/// Trait for domains that can be searched.
///
/// # Contract
///
/// - `expand` must have finite fan-out and be deterministic: same state,
///   same edges in the same order.
/// - `heuristic` should never overestimate the remaining cost if the
///   caller needs an optimal result. The engine does not check this.
/// - Node identity is `State` equality: structurally equal states always
///   share one search node.
pub trait SearchWorld {
    /// Value-typed, hashable state.
    type State: Clone + Eq + Hash + Debug;
    /// Structural edge class; use `()` when the domain has none.
    type Class: Copy + Eq + Ord + Debug;

    /// Enumerate every edge leaving `state`.
    fn expand(&self, state: &Self::State) -> Vec<Edge<Self::State, Self::Class>>;

    /// Test whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Estimate of the remaining cost from `state`.
    fn heuristic(&self, _state: &Self::State) -> i64 {
        0
    }

    /// Whether every available resource has been used by the time `state`
    /// is reached. Only consulted in exhaustive mode.
    fn resources_consumed(&self, _state: &Self::State) -> bool {
        true
    }

    /// Early pruning of accumulated costs that can never lead to a goal.
    fn is_cost_valid(&self, _cost: i64) -> bool {
        true
    }
}
