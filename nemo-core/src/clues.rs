use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::{error::ClueError, grid::Grid};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Clue(Vec<usize>);

impl Clue {
    pub fn new(runs: Vec<usize>) -> Self { Self(runs) }

    pub fn of_line(line: impl IntoIterator<Item = bool>) -> Self {
        Self(line.into_iter().dedup_with_count().filter(|&(_, filled)| filled).map(|(n, _)| n).collect())
    }

    pub fn runs(&self) -> &[usize] { &self.0 }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn filled(&self) -> usize { self.0.iter().sum() }

    pub fn min_length(&self) -> usize {
        if self.0.is_empty() { 0 } else { self.filled() + self.0.len() - 1 }
    }
}

impl Display for Clue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() { return write!(f, "0"); }
        write!(f, "{}", self.0.iter().join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clues {
    pub rows: Vec<Clue>,
    pub columns: Vec<Clue>,
}

impl Clues {
    /// Checks that every line can hold its runs before anything is solved from them.
    pub fn new(rows: Vec<Clue>, columns: Vec<Clue>) -> Result<Self, ClueError> {
        if rows.is_empty() { return Err(ClueError::LineCount { axis: "row", expected: 1, found: 0 }); }
        if columns.is_empty() { return Err(ClueError::LineCount { axis: "column", expected: 1, found: 0 }); }
        let (width, height) = (columns.len(), rows.len());
        for (axis, lines, length) in [("row", &rows, width), ("column", &columns, height)] {
            for (index, clue) in lines.iter().enumerate() {
                if clue.runs().contains(&0) { return Err(ClueError::ZeroRun { axis, index }); }
                let needed = clue.min_length();
                if needed > length { return Err(ClueError::Overflow { axis, index, needed, length }); }
            }
        }
        Ok(Self { rows, columns })
    }

    pub fn generate(grid: &Grid) -> Self {
        let rows = (0..grid.height()).map(|r| Clue::of_line(grid.row(r).iter().copied())).collect();
        let columns = (0..grid.width()).map(|c| Clue::of_line(grid.column(c))).collect();
        Self { rows, columns }
    }

    pub fn width(&self) -> usize { self.columns.len() }
    pub fn height(&self) -> usize { self.rows.len() }
}
