//! Optimal-state enumeration against the brute-force union of every
//! minimum-cost simple path.

use std::collections::HashSet;

use lock_tests::random_graph::RandomGraph;
use waypoint_search::enumerate::{enumerate_optimal_states, optimal_states};
use waypoint_search::error::SearchError;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::search;

const SEEDS: u64 = 200;

#[test]
fn enumeration_matches_brute_force_union() {
    for seed in 0..SEEDS {
        // Small cost range so ties between paths are common.
        let graph = RandomGraph::generate(seed, 7, 3, 3);
        let Some(bound) = graph.min_cost(0) else {
            continue;
        };
        let states = enumerate_optimal_states(&graph, 0, bound, &SearchPolicy::default()).unwrap();
        assert_eq!(
            states,
            graph.states_at_cost(0, bound),
            "seed {seed}: {graph:?}"
        );
    }
}

#[test]
fn heuristic_pruning_does_not_lose_states() {
    for seed in 0..SEEDS {
        let graph = RandomGraph::generate(seed, 7, 3, 3).with_admissible_heuristic();
        let Some(bound) = graph.min_cost(0) else {
            continue;
        };
        let states = optimal_states(&graph, 0, &SearchPolicy::default())
            .unwrap()
            .unwrap();
        assert_eq!(states, graph.states_at_cost(0, bound), "seed {seed}");
    }
}

#[test]
fn enumeration_contains_the_search_path() {
    for seed in 0..SEEDS {
        let graph = RandomGraph::generate(seed, 7, 3, 3);
        let Some(path) = search(&graph, 0, &SearchPolicy::default()).unwrap().path else {
            continue;
        };
        let states =
            enumerate_optimal_states(&graph, 0, path.cost(), &SearchPolicy::default()).unwrap();
        for state in path.states() {
            assert!(states.contains(state), "seed {seed}: {state} missing");
        }
    }
}

#[test]
fn no_enumerated_state_lies_beyond_the_bound() {
    for seed in 0..SEEDS {
        let graph = RandomGraph::generate(seed, 7, 3, 3);
        let Some(states) = optimal_states(&graph, 0, &SearchPolicy::default()).unwrap() else {
            continue;
        };
        let bound = graph.min_cost(0).unwrap();
        for &state in &states {
            let reach = cheapest_cost_to(&graph, state);
            assert!(reach <= bound, "seed {seed}: state {state} at {reach} > {bound}");
        }
    }
}

#[test]
fn unreachable_goal_enumerates_nothing() {
    for seed in 0..SEEDS {
        let graph = RandomGraph::generate(seed, 7, 2, 3);
        if graph.min_cost(0).is_some() {
            continue;
        }
        assert_eq!(
            optimal_states(&graph, 0, &SearchPolicy::default()).unwrap(),
            None
        );
        assert_eq!(
            enumerate_optimal_states(&graph, 0, 1_000, &SearchPolicy::default()).unwrap(),
            HashSet::new()
        );
    }
}

#[test]
fn tiny_branch_budget_is_reported() {
    let policy = SearchPolicy {
        max_branches: 1,
        ..SearchPolicy::default()
    };
    let mut hit = false;
    for seed in 0..SEEDS {
        let graph = RandomGraph::generate(seed, 7, 3, 3);
        let Some(bound) = graph.min_cost(0) else {
            continue;
        };
        match enumerate_optimal_states(&graph, 0, bound, &policy) {
            Err(SearchError::BranchBudgetExceeded { limit }) => {
                assert_eq!(limit, 1);
                hit = true;
            }
            Ok(_) => {}
            Err(other) => panic!("seed {seed}: unexpected {other:?}"),
        }
    }
    assert!(hit, "no seed needed more than one fork");
}

/// Minimum cost from node 0 to `state`, by brute force.
fn cheapest_cost_to(graph: &RandomGraph, state: usize) -> i64 {
    graph
        .simple_paths_to(0, state)
        .into_iter()
        .map(|(_, cost)| cost)
        .min()
        .unwrap_or(i64::MAX)
}
