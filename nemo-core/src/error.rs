use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,
    #[error("claimed width {claimed} but rows are {actual} cells wide")]
    WidthMismatch { claimed: usize, actual: usize },
    #[error("claimed height {claimed} but {actual} rows were given")]
    HeightMismatch { claimed: usize, actual: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("{width}x{height} exceeds the {max_width}x{max_height} limit")]
    TooLarge { width: usize, height: usize, max_width: usize, max_height: usize },
    #[error("invalid symbol {symbol:?} at row {row}, col {col}")]
    InvalidSymbol { row: usize, col: usize, symbol: char },
    #[error("encoded solution has {found} bytes, {width}x{height} needs {expected}")]
    BadEncoding { width: usize, height: usize, expected: usize, found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClueError {
    #[error("expected {expected} {axis} clues, got {found}")]
    LineCount { axis: &'static str, expected: usize, found: usize },
    #[error("{axis} {index}: runs need {needed} cells but the line has {length}")]
    Overflow { axis: &'static str, index: usize, needed: usize, length: usize },
    #[error("{axis} {index}: run lengths must be positive")]
    ZeroRun { axis: &'static str, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed grid: {0}")]
    Malformed(#[from] GridError),
    #[error("no verdict within {budget:?} (gave up after {elapsed:?})")]
    Timeout { elapsed: Duration, budget: Duration },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
