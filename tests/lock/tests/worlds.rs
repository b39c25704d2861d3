//! End-to-end runs of the reference worlds through the harness runner.

use lock_tests::samples::{CALIBRATION, CLAW_MACHINES, MAZE_LARGE, MAZE_SMALL};
use waypoint_harness::runner::run_reference;
use waypoint_harness::worlds::calibration::{
    parse_rows, total_calibration, Calibration, Operator,
};
use waypoint_harness::worlds::claw_machine::{parse_machines, total_tokens, ClawMachine};
use waypoint_harness::worlds::reindeer_maze::{Move, ReindeerMaze};
use waypoint_search::search::TerminationReason;

#[test]
fn maze_small_lowest_score_and_seats() {
    let maze = ReindeerMaze::parse(MAZE_SMALL).unwrap();
    assert_eq!(maze.lowest_score(), Ok(Some(7036)));
    assert_eq!(maze.best_seat_count(), Ok(45));
}

#[test]
fn maze_large_lowest_score_and_seats() {
    let maze = ReindeerMaze::parse(MAZE_LARGE).unwrap();
    assert_eq!(maze.lowest_score(), Ok(Some(11048)));
    assert_eq!(maze.best_seat_count(), Ok(64));
}

#[test]
fn maze_path_tally_explains_the_score() {
    let maze = ReindeerMaze::parse(MAZE_SMALL).unwrap();
    let run = run_reference(&maze, false).unwrap();
    let path = run.outcome.path.unwrap();
    let tally = path.class_tally();
    let advances = i64::try_from(tally.get(&Move::Advance).copied().unwrap_or(0)).unwrap();
    let rotations = i64::try_from(tally.get(&Move::Rotate).copied().unwrap_or(0)).unwrap();
    assert_eq!(advances + 1000 * rotations, 7036);
    assert_eq!(rotations, 7);
}

#[test]
fn maze_report_lists_every_optimal_pose() {
    let maze = ReindeerMaze::parse(MAZE_LARGE).unwrap();
    let run = run_reference(&maze, true).unwrap();
    let states = run.optimal_states.as_ref().unwrap();
    assert_eq!(
        run.report.value["optimal_states"]["count"],
        serde_json::json!(states.len())
    );
    assert_eq!(run.report.value["world_id"], "reindeer_maze");
    assert_eq!(run.report.value["path"]["cost"], 11048);
}

#[test]
fn calibration_totals() {
    let rows = parse_rows(CALIBRATION).unwrap();
    assert_eq!(total_calibration(&rows, &Operator::BASIC), Ok(3749));
    assert_eq!(total_calibration(&rows, &Operator::ALL), Ok(11387));
}

#[test]
fn calibration_runs_under_maximize_and_exhaustive_mode() {
    let rows = parse_rows(CALIBRATION).unwrap();
    let unsolvable = &rows[2];
    let world = Calibration::new(unsolvable, &Operator::ALL);
    let run = run_reference(&world, false).unwrap();
    assert_eq!(run.outcome.stats.termination, TerminationReason::FrontierExhausted);
    assert_eq!(run.report.value["policy"]["objective"], "maximize");
    assert_eq!(run.report.value["policy"]["exhaustive"], true);
}

#[test]
fn claw_totals() {
    let machines = parse_machines(CLAW_MACHINES).unwrap();
    assert_eq!(total_tokens(&machines), Ok(480));

    let far: Vec<ClawMachine> = machines.into_iter().map(ClawMachine::far_prize).collect();
    let winners: Vec<bool> = far.iter().map(|m| m.solve().unwrap().is_some()).collect();
    assert_eq!(winners, vec![false, true, false, true]);
}

#[test]
fn claw_search_run_reports_button_tally() {
    let machines = parse_machines(CLAW_MACHINES).unwrap();
    let run = run_reference(&machines[0], false).unwrap();
    assert_eq!(run.outcome.cost(), Some(280));
    assert_eq!(run.report.value["path"]["class_tally"]["'A'"], 80);
    assert_eq!(run.report.value["path"]["class_tally"]["'B'"], 40);
}
