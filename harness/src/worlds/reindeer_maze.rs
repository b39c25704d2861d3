//! `ReindeerMaze`: a grid maze where turning costs far more than stepping.
//!
//! The reindeer starts on `S` facing east and must stand on `E`. It may
//! advance one cell in its facing direction or rotate 90° in place. The
//! state is (cell, facing), so a cell is visited once per direction.
//!
//! Grid alphabet: `#` wall, `.` open, `S` start, `E` end.

use std::collections::BTreeSet;

use waypoint_search::contract::{Edge, SearchWorld};
use waypoint_search::enumerate::optimal_states;
use waypoint_search::error::SearchError;
use waypoint_search::policy::{SearchPolicy, DEFAULT_MAX_BRANCHES};
use waypoint_search::search::search;

use crate::contract::ReferenceWorld;
use crate::error::HarnessError;

/// Cost of moving one cell forward.
pub const DEFAULT_STEP_COST: i64 = 1;
/// Cost of a 90° rotation.
pub const DEFAULT_TURN_COST: i64 = 1000;
/// Enumeration forks allowed per pose when no explicit budget is set.
pub const BRANCHES_PER_POSE: u64 = 64;

/// Compass direction the reindeer faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    #[must_use]
    pub fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    #[must_use]
    pub fn counter_clockwise(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Row and column delta of one step.
    fn delta(self) -> (isize, isize) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }
}

/// Kind of move; the edge class used by path enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Move {
    Advance,
    Rotate,
}

/// Position and heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pose {
    pub row: usize,
    pub col: usize,
    pub facing: Facing,
}

/// Step and turn prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeCosts {
    pub step: i64,
    pub turn: i64,
}

impl Default for MazeCosts {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP_COST,
            turn: DEFAULT_TURN_COST,
        }
    }
}

/// Parsed maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReindeerMaze {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    start: (usize, usize),
    end: (usize, usize),
    costs: MazeCosts,
    branch_budget: Option<u64>,
}

impl ReindeerMaze {
    /// Parse a rectangular grid. Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::EmptyInput`] for a grid with no rows.
    /// - [`HarnessError::RaggedGrid`] when rows differ in width.
    /// - [`HarnessError::InvalidGridChar`] for characters outside `#.SE`.
    /// - [`HarnessError::MissingMarker`] / [`HarnessError::DuplicateMarker`]
    ///   unless exactly one `S` and one `E` are present.
    pub fn parse(text: &str) -> Result<Self, HarnessError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(HarnessError::EmptyInput {
                detail: "maze has no rows".into(),
            });
        };
        let width = first.chars().count();

        let mut walls = Vec::with_capacity(width * rows.len());
        let mut start = None;
        let mut end = None;
        for (row, line) in rows.iter().enumerate() {
            let cells = line.chars().count();
            if cells != width {
                return Err(HarnessError::RaggedGrid {
                    row,
                    width: cells,
                    expected: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => walls.push(true),
                    '.' => walls.push(false),
                    'S' | 'E' => {
                        let slot = if ch == 'S' { &mut start } else { &mut end };
                        if slot.is_some() {
                            return Err(HarnessError::DuplicateMarker {
                                marker: ch,
                                row,
                                col,
                            });
                        }
                        *slot = Some((row, col));
                        walls.push(false);
                    }
                    _ => return Err(HarnessError::InvalidGridChar { row, col, ch }),
                }
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            walls,
            start: start.ok_or(HarnessError::MissingMarker { marker: 'S' })?,
            end: end.ok_or(HarnessError::MissingMarker { marker: 'E' })?,
            costs: MazeCosts::default(),
            branch_budget: None,
        })
    }

    /// Use different step and turn prices.
    #[must_use]
    pub fn with_costs(mut self, costs: MazeCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Cap seat enumeration at `limit` forks instead of the budget scaled
    /// to the grid.
    #[must_use]
    pub fn with_branch_budget(mut self, limit: u64) -> Self {
        self.branch_budget = Some(limit);
        self
    }

    #[must_use]
    pub fn start_cell(&self) -> (usize, usize) {
        self.start
    }

    #[must_use]
    pub fn end_cell(&self) -> (usize, usize) {
        self.end
    }

    /// Whether `(row, col)` is inside the grid and not a wall.
    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && !self.walls[row * self.width + col]
    }

    /// Lowest possible score from start to end, or `None` if unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero branch budget.
    pub fn lowest_score(&self) -> Result<Option<i64>, SearchError> {
        Ok(search(self, self.start(), &self.policy())?.cost())
    }

    /// Number of distinct cells on at least one lowest-score route.
    ///
    /// Returns 0 when the end is unreachable.
    ///
    /// # Errors
    ///
    /// Same as [`ReindeerMaze::best_seats`].
    pub fn best_seat_count(&self) -> Result<usize, SearchError> {
        Ok(self.best_seats()?.len())
    }

    /// Cells on at least one lowest-score route, in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::BranchBudgetExceeded`] when the routes fork
    /// more often than the branch budget allows, and
    /// [`SearchError::InvalidPolicy`] for a zero budget.
    pub fn best_seats(&self) -> Result<BTreeSet<(usize, usize)>, SearchError> {
        let states = optimal_states(self, self.start(), &self.policy())?;
        Ok(states
            .into_iter()
            .flatten()
            .map(|p| (p.row, p.col))
            .collect())
    }

    fn step(&self, pose: &Pose) -> Option<(usize, usize)> {
        let (dr, dc) = pose.facing.delta();
        let row = pose.row.checked_add_signed(dr)?;
        let col = pose.col.checked_add_signed(dc)?;
        self.is_open(row, col).then_some((row, col))
    }
}

impl SearchWorld for ReindeerMaze {
    type State = Pose;
    type Class = Move;

    fn expand(&self, pose: &Self::State) -> Vec<Edge<Self::State, Self::Class>> {
        let mut edges = Vec::with_capacity(3);
        if let Some((row, col)) = self.step(pose) {
            let ahead = Pose { row, col, ..*pose };
            edges.push(Edge::new(ahead, self.costs.step, Move::Advance));
        }
        for facing in [pose.facing.clockwise(), pose.facing.counter_clockwise()] {
            let turned = Pose { facing, ..*pose };
            edges.push(Edge::new(turned, self.costs.turn, Move::Rotate));
        }
        edges
    }

    fn is_goal(&self, pose: &Self::State) -> bool {
        (pose.row, pose.col) == self.end
    }

    #[allow(clippy::cast_possible_wrap)]
    fn heuristic(&self, pose: &Self::State) -> i64 {
        let distance = pose.row.abs_diff(self.end.0) + pose.col.abs_diff(self.end.1);
        (distance as i64).saturating_mul(self.costs.step)
    }
}

impl ReferenceWorld for ReindeerMaze {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "reindeer_maze"
    }

    fn start(&self) -> Self::State {
        Pose {
            row: self.start.0,
            col: self.start.1,
            facing: Facing::East,
        }
    }

    fn policy(&self) -> SearchPolicy {
        let max_branches = self.branch_budget.unwrap_or_else(|| {
            let poses = u64::try_from(self.width * self.height * 4).unwrap_or(u64::MAX);
            poses
                .saturating_mul(BRANCHES_PER_POSE)
                .max(DEFAULT_MAX_BRANCHES)
        });
        SearchPolicy {
            max_branches,
            ..SearchPolicy::default()
        }
    }
}
