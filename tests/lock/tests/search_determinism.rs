//! In-process determinism: repeated runs produce identical outcomes,
//! statistics and canonical report bytes.

use lock_tests::random_graph::RandomGraph;
use lock_tests::samples::MAZE_SMALL;
use waypoint_harness::runner::run_reference;
use waypoint_harness::worlds::reindeer_maze::ReindeerMaze;
use waypoint_search::contract::{Edge, SearchWorld};
use waypoint_search::policy::SearchPolicy;
use waypoint_search::report::SearchReport;
use waypoint_search::search::search;

#[test]
fn maze_report_bytes_stable_n10() {
    let maze = ReindeerMaze::parse(MAZE_SMALL).unwrap();
    let first = run_reference(&maze, true).unwrap();

    for i in 1..10 {
        let again = run_reference(&maze, true).unwrap();
        assert_eq!(first.report.bytes, again.report.bytes, "run {i}");
        assert_eq!(first.report.digest, again.report.digest, "run {i}");
        assert_eq!(first.outcome.stats, again.outcome.stats, "run {i}");
        assert_eq!(first.outcome.path, again.outcome.path, "run {i}");
    }
}

#[test]
fn random_graph_reports_stable() {
    let policy = SearchPolicy::default();
    for seed in 0..50 {
        let graph = RandomGraph::generate(seed, 8, 3, 4).with_admissible_heuristic();
        let digest = |g: &RandomGraph| {
            let outcome = search(g, 0, &policy).unwrap();
            SearchReport::build(&outcome, &policy, None).unwrap().digest
        };
        let first = digest(&graph);
        // A regenerated graph from the same seed is a distinct value.
        let rebuilt = RandomGraph::generate(seed, 8, 3, 4).with_admissible_heuristic();
        assert_eq!(first, digest(&graph), "seed {seed}");
        assert_eq!(first, digest(&rebuilt), "seed {seed}");
    }
}

/// Star with `n` leaves, all at the same cost; the goal is unreachable, so
/// every leaf is popped and the pop order is the frontier tie-break order.
struct EqualStar {
    leaves: u32,
}

impl SearchWorld for EqualStar {
    type State = u32;
    type Class = ();

    fn expand(&self, state: &u32) -> Vec<Edge<u32, ()>> {
        if *state == 0 {
            (1..=self.leaves).map(|leaf| Edge::new(leaf, 5, ())).collect()
        } else {
            Vec::new()
        }
    }

    fn is_goal(&self, _state: &u32) -> bool {
        false
    }
}

#[test]
fn equal_rank_ties_resolve_identically() {
    let world = EqualStar { leaves: 64 };
    let policy = SearchPolicy {
        max_expansions: Some(10),
        ..SearchPolicy::default()
    };
    let first = search(&world, 0, &policy).unwrap();
    let first_report = SearchReport::build(&first, &policy, None).unwrap();
    for _ in 0..10 {
        let again = search(&world, 0, &policy).unwrap();
        assert_eq!(first.stats, again.stats);
        assert_eq!(
            first_report.bytes,
            SearchReport::build(&again, &policy, None).unwrap().bytes
        );
    }
    assert_eq!(first.stats.expansions, 10);
    assert_eq!(first.stats.frontier_high_water, 64);
}
