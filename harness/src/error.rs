//! Typed failures for world construction and world-level solving.

use thiserror::Error;

use waypoint_search::error::SearchError;

/// A reference world could not be built from its input, or could not
/// settle a question about it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// A grid cell held a character outside the world's alphabet.
    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    InvalidGridChar { row: usize, col: usize, ch: char },
    /// Grid rows differ in length.
    #[error("row {row} has width {width}, expected {expected}")]
    RaggedGrid {
        row: usize,
        width: usize,
        expected: usize,
    },
    /// A required marker (e.g. start or end) is absent.
    #[error("missing {marker:?} marker")]
    MissingMarker { marker: char },
    /// A marker that must be unique appears more than once.
    #[error("duplicate {marker:?} marker at row {row}, column {col}")]
    DuplicateMarker { marker: char, row: usize, col: usize },
    /// A text line could not be parsed.
    #[error("line {line}: {detail}")]
    MalformedLine { line: usize, detail: String },
    /// A world parameter is outside its supported range.
    #[error("invalid parameter: {detail}")]
    InvalidParameter { detail: String },
    /// A world was given no data to work with.
    #[error("empty input: {detail}")]
    EmptyInput { detail: String },
    /// The engine rejected a search or enumeration request.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// A search ran out of expansions before it could answer.
    #[error("{world} search exhausted its budget of {limit} expansions")]
    SearchBudgetExhausted { world: &'static str, limit: u64 },
}
