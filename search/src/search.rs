//! Search entry point and expansion loop.

use std::collections::BTreeMap;

use crate::contract::SearchWorld;
use crate::error::SearchError;
use crate::frontier::OpenQueue;
use crate::node::NodeId;
use crate::policy::SearchPolicy;
use crate::registry::StateRegistry;

/// One state on a reconstructed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep<S, K> {
    /// The state reached.
    pub state: S,
    /// Accumulated cost on arrival.
    pub cost: i64,
    /// Class of the edge that led here (`None` for the start).
    pub class: Option<K>,
}

/// Ordered sequence of steps from start to goal.
///
/// Never empty: a path always contains at least the start state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<S, K> {
    steps: Vec<PathStep<S, K>>,
}

impl<S, K: Copy + Ord> Path<S, K> {
    /// All steps, start first.
    #[must_use]
    pub fn steps(&self) -> &[PathStep<S, K>] {
        &self.steps
    }

    /// Number of states on the path (edges + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total accumulated cost at the goal.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.steps.last().map_or(0, |s| s.cost)
    }

    /// The start state.
    #[must_use]
    pub fn start(&self) -> Option<&S> {
        self.steps.first().map(|s| &s.state)
    }

    /// The goal state.
    #[must_use]
    pub fn goal(&self) -> Option<&S> {
        self.steps.last().map(|s| &s.state)
    }

    /// States in path order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.steps.iter().map(|s| &s.state)
    }

    /// How many edges of each class the path uses.
    #[must_use]
    pub fn class_tally(&self) -> BTreeMap<K, u64> {
        let mut tally = BTreeMap::new();
        for class in self.steps.iter().filter_map(|s| s.class) {
            *tally.entry(class).or_insert(0) += 1;
        }
        tally
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A state satisfying the goal was popped.
    GoalReached,
    /// The open set emptied without reaching a goal.
    FrontierExhausted,
    /// `max_expansions` was hit.
    ExpansionBudgetExceeded,
}

impl TerminationReason {
    /// Stable snake_case name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
        }
    }
}

/// Counters collected over one search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped and expanded (goal pop excluded).
    pub expansions: u64,
    /// Distinct states registered.
    pub nodes_created: u64,
    /// Open or closed nodes re-opened by a strictly better route.
    pub reopened: u64,
    /// Candidates rejected by the cost-validity predicate.
    pub cost_pruned: u64,
    /// Largest open-set size observed.
    pub frontier_high_water: u64,
    pub termination: TerminationReason,
}

/// Result of a search execution.
///
/// `path` is `None` unless the goal was reached. A missing path is a
/// normal outcome, not an error.
#[derive(Debug, Clone)]
pub struct SearchOutcome<S, K> {
    pub path: Option<Path<S, K>>,
    pub stats: SearchStats,
}

impl<S, K: Copy + Ord> SearchOutcome<S, K> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.stats.termination == TerminationReason::GoalReached
    }

    /// Cost of the found path, if any.
    #[must_use]
    pub fn cost(&self) -> Option<i64> {
        self.path.as_ref().map(Path::cost)
    }
}

/// Outcome type for a given world.
pub type WorldOutcome<W> = SearchOutcome<<W as SearchWorld>::State, <W as SearchWorld>::Class>;

/// Run best-first search from `start`.
///
/// Returns the first goal popped from the open set. With an admissible
/// heuristic under [`crate::policy::Objective::Minimize`] that path has
/// minimum cost.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] only for pre-flight policy
/// validation failures. No search step is taken in that case.
pub fn search<W: SearchWorld>(
    world: &W,
    start: W::State,
    policy: &SearchPolicy,
) -> Result<WorldOutcome<W>, SearchError> {
    policy.validate()?;
    let objective = policy.objective;

    let mut registry: StateRegistry<W::State, W::Class> = StateRegistry::new();
    let mut queue = OpenQueue::new();
    let mut expansions: u64 = 0;
    let mut reopened: u64 = 0;
    let mut cost_pruned: u64 = 0;
    let mut goal: Option<NodeId> = None;

    let root = registry.get_or_create(&start);
    {
        let node = registry.node_mut(root);
        node.cost = Some(0);
        node.rank = Some(objective.rank(0, world.heuristic(&start)));
        node.open = true;
    }
    queue.push(root, &mut registry);

    let termination = loop {
        if policy.max_expansions.is_some_and(|limit| expansions >= limit) {
            break TerminationReason::ExpansionBudgetExceeded;
        }
        let Some(current) = queue.pop(&mut registry) else {
            break TerminationReason::FrontierExhausted;
        };

        let (state, current_cost, current_depth) = {
            let node = registry.node_mut(current);
            node.open = false;
            node.closed = true;
            (node.state.clone(), node.cost.unwrap_or(0), node.depth)
        };

        if world.is_goal(&state) && (!policy.exhaustive || world.resources_consumed(&state)) {
            goal = Some(current);
            break TerminationReason::GoalReached;
        }
        expansions += 1;

        for edge in world.expand(&state) {
            let cost = current_cost.saturating_add(edge.cost);
            if !world.is_cost_valid(cost) {
                cost_pruned += 1;
                continue;
            }
            let next = registry.get_or_create(&edge.target);

            let (recorded, slot, explored) = {
                let node = registry.node(next);
                (node.cost, node.heap_index(), !node.is_unexplored())
            };
            if explored && recorded.is_some_and(|old| objective.improves(cost, old)) {
                if let Some(slot) = slot {
                    queue.remove(slot, &mut registry);
                }
                let node = registry.node_mut(next);
                node.open = false;
                node.closed = false;
                reopened += 1;
                #[cfg(feature = "tracing")]
                tracing::trace!(state = ?edge.target, old = ?recorded, new = cost, "re-opening node");
            }

            if registry.node(next).is_unexplored() {
                let rank = objective.rank(cost, world.heuristic(&edge.target));
                let node = registry.node_mut(next);
                node.rank = Some(rank);
                node.cost = Some(cost);
                node.parent = Some(current);
                node.inbound = Some(edge.class);
                node.depth = current_depth.saturating_add(1);
                node.open = true;
                queue.push(next, &mut registry);
            }
        }
    };

    let path = goal.map(|id| build_path(&registry, id));
    let stats = SearchStats {
        expansions,
        nodes_created: registry.len() as u64,
        reopened,
        cost_pruned,
        frontier_high_water: queue.high_water(),
        termination,
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        termination = termination.as_str(),
        expansions,
        nodes = stats.nodes_created,
        cost = ?path.as_ref().map(Path::cost),
        "search finished"
    );

    Ok(SearchOutcome { path, stats })
}

/// Reconstruct the path from the root to `goal` through parent links.
fn build_path<S, K>(registry: &StateRegistry<S, K>, goal: NodeId) -> Path<S, K>
where
    S: Clone + Eq + std::hash::Hash,
    K: Copy,
{
    let steps = registry
        .reconstruct(goal)
        .into_iter()
        .map(|id| {
            let node = registry.node(id);
            PathStep {
                state: node.state.clone(),
                cost: node.cost.unwrap_or(0),
                class: node.inbound,
            }
        })
        .collect();
    Path { steps }
}
