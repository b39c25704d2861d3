//! `Calibration`: operator-insertion equations searched under `Maximize`.
//!
//! Each row is `target: n0 n1 … nk`. Operators are inserted between the
//! numbers and evaluated strictly left to right. A row is solvable when
//! some operator sequence using every number evaluates to the target.
//!
//! The search state is (index of the last consumed number, accumulated
//! value). The accumulated cost is the value gained over `n0`, so the
//! validity predicate `n0 + cost <= target` prunes every branch that has
//! already overshot: no operator decreases a non-negative value.

use waypoint_search::contract::{Edge, SearchWorld};
use waypoint_search::error::SearchError;
use waypoint_search::policy::{Objective, SearchPolicy};
use waypoint_search::search::search;

use crate::contract::ReferenceWorld;
use crate::error::HarnessError;

/// Binary operator inserted between two numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    Add,
    Mul,
    /// Decimal digit concatenation: `12 || 345 = 12345`.
    Concat,
}

impl Operator {
    /// Addition and multiplication.
    pub const BASIC: [Operator; 2] = [Operator::Add, Operator::Mul];
    /// Every operator including concatenation.
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Mul, Operator::Concat];

    /// Apply to `acc` and `n`. `None` on overflow, or for `Concat` with a
    /// negative right operand.
    #[must_use]
    pub fn apply(self, acc: i64, n: i64) -> Option<i64> {
        match self {
            Self::Add => acc.checked_add(n),
            Self::Mul => acc.checked_mul(n),
            Self::Concat => {
                if n < 0 {
                    return None;
                }
                let mut shift: i64 = 10;
                while shift <= n {
                    shift = shift.checked_mul(10)?;
                }
                acc.checked_mul(shift)?.checked_add(n)
            }
        }
    }
}

/// One equation: a target and the numbers to combine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationRow {
    pub target: i64,
    pub numbers: Vec<i64>,
}

impl CalibrationRow {
    /// Build a row. At least one number is required.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::EmptyInput`] if `numbers` is empty.
    pub fn new(target: i64, numbers: Vec<i64>) -> Result<Self, HarnessError> {
        if numbers.is_empty() {
            return Err(HarnessError::EmptyInput {
                detail: format!("calibration row for {target} has no numbers"),
            });
        }
        Ok(Self { target, numbers })
    }

    /// Parse `target: n0 n1 … nk`. `line` is 1-based and used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::MalformedLine`] for a missing colon or a
    /// non-integer token, [`HarnessError::EmptyInput`] for no numbers.
    pub fn parse(line: usize, text: &str) -> Result<Self, HarnessError> {
        let malformed = |detail: String| HarnessError::MalformedLine { line, detail };
        let (target, rest) = text
            .split_once(':')
            .ok_or_else(|| malformed("expected `target: numbers`".into()))?;
        let target = target
            .trim()
            .parse::<i64>()
            .map_err(|e| malformed(format!("target {:?}: {e}", target.trim())))?;
        let numbers = rest
            .split_whitespace()
            .map(|tok| {
                tok.parse::<i64>()
                    .map_err(|e| malformed(format!("number {tok:?}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(target, numbers)
    }

    /// Whether some sequence of `ops` over every number reaches the target.
    ///
    /// # Errors
    ///
    /// Same as [`CalibrationRow::solve`].
    pub fn is_solvable(&self, ops: &[Operator]) -> Result<bool, SearchError> {
        Ok(self.solve(ops)?.is_some())
    }

    /// One operator sequence that reaches the target, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the world's policy is
    /// rejected by the engine.
    pub fn solve(&self, ops: &[Operator]) -> Result<Option<Vec<Operator>>, SearchError> {
        let world = Calibration::new(self, ops);
        let outcome = search(&world, world.start(), &world.policy())?;
        Ok(outcome
            .path
            .map(|path| path.steps().iter().filter_map(|step| step.class).collect()))
    }
}

/// Parse one row per non-blank line.
///
/// # Errors
///
/// Propagates the first [`CalibrationRow::parse`] failure.
pub fn parse_rows(text: &str) -> Result<Vec<CalibrationRow>, HarnessError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| CalibrationRow::parse(i + 1, line))
        .collect()
}

/// Sum of the targets of every row solvable with `ops`.
///
/// # Errors
///
/// Propagates the first [`CalibrationRow::solve`] failure.
pub fn total_calibration(rows: &[CalibrationRow], ops: &[Operator]) -> Result<i64, SearchError> {
    let mut total = 0;
    for row in rows {
        if row.is_solvable(ops)? {
            total += row.target;
        }
    }
    Ok(total)
}

/// Search state: last consumed number and the value so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalibrationState {
    pub index: usize,
    pub value: i64,
}

/// A single row exposed as a search world.
#[derive(Debug, Clone, Copy)]
pub struct Calibration<'a> {
    row: &'a CalibrationRow,
    ops: &'a [Operator],
}

impl<'a> Calibration<'a> {
    #[must_use]
    pub fn new(row: &'a CalibrationRow, ops: &'a [Operator]) -> Self {
        Self { row, ops }
    }

    fn first(&self) -> i64 {
        self.row.numbers.first().copied().unwrap_or(0)
    }

    fn last_index(&self) -> usize {
        self.row.numbers.len().saturating_sub(1)
    }
}

impl SearchWorld for Calibration<'_> {
    type State = CalibrationState;
    type Class = Operator;

    fn expand(&self, state: &Self::State) -> Vec<Edge<Self::State, Self::Class>> {
        let Some(&next) = self.row.numbers.get(state.index + 1) else {
            return Vec::new();
        };
        self.ops
            .iter()
            .filter_map(|&op| {
                let value = op.apply(state.value, next)?;
                let target = CalibrationState {
                    index: state.index + 1,
                    value,
                };
                Some(Edge::new(target, value.saturating_sub(state.value), op))
            })
            .collect()
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        state.value == self.row.target
    }

    #[allow(clippy::cast_possible_wrap)]
    fn heuristic(&self, state: &Self::State) -> i64 {
        -(state.index as i64)
    }

    fn resources_consumed(&self, state: &Self::State) -> bool {
        state.index == self.last_index()
    }

    fn is_cost_valid(&self, cost: i64) -> bool {
        self.first().saturating_add(cost) <= self.row.target
    }
}

impl ReferenceWorld for Calibration<'_> {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "calibration"
    }

    fn start(&self) -> Self::State {
        CalibrationState {
            index: 0,
            value: self.first(),
        }
    }

    fn policy(&self) -> SearchPolicy {
        SearchPolicy::exhaustive().with_objective(Objective::Maximize)
    }
}
