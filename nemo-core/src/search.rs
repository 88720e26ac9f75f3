use log::trace;

use crate::{
    deadline::Deadline,
    grid::{Grid, Pos},
    line::Cell,
    propagate::{propagate, Board, Line},
    solver::{Halt, SolveStats},
};

pub const SOLUTION_CAP: usize = 2;

const BRANCHES: [Cell; 2] = [Cell::Filled, Cell::Blank];

// One guessed cell on the search stack. `mark` is the board trail length before the
// guess, so undoing to it erases the guess and everything propagated from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub cell: Pos,
    tried: usize,
    mark: usize,
}

impl SearchNode {
    fn new(cell: Pos, mark: usize) -> Self { Self { cell, tried: 0, mark } }
}

/// Depth-first search over an explicit stack, propagating after every guess. The stack
/// never holds more nodes than the board has cells. Only `Halt::Timeout` is returned as
/// an error; contradictions just prune a branch.
pub fn search(board: &mut Board<'_>, deadline: &Deadline, stats: &mut SolveStats) -> Result<Vec<Grid>, Halt> {
    let mut solutions = Vec::with_capacity(SOLUTION_CAP);
    let Some(first) = choose_cell(board) else {
        solutions.extend(board.to_grid());
        return Ok(solutions);
    };
    let mut stack = Vec::with_capacity(board.width() * board.height());
    stack.push(SearchNode::new(first, board.mark()));
    stats.max_depth = stats.max_depth.max(1);

    while let Some(node) = stack.last_mut() {
        board.undo_to(node.mark);
        let Some(&value) = BRANCHES.get(node.tried) else {
            trace!("backtrack from r{},c{} at depth {}", node.cell.r + 1, node.cell.c + 1, stack.len());
            stack.pop();
            continue;
        };
        node.tried += 1;
        let cell = node.cell;

        if deadline.expired() { return Err(Halt::Timeout); }
        stats.guesses += 1;
        trace!("guess {:?} at r{},c{} (depth {})", value, cell.r + 1, cell.c + 1, stack.len());

        board.assign(cell, value);
        match propagate(board, [Line::Row(cell.r), Line::Column(cell.c)], deadline, stats) {
            Ok(()) => {}
            Err(Halt::Contradiction) => continue,
            Err(Halt::Timeout) => return Err(Halt::Timeout),
        }

        match board.to_grid() {
            Some(grid) => {
                trace!("solution #{} found", solutions.len() + 1);
                solutions.push(grid);
                if solutions.len() >= SOLUTION_CAP { break; }
            }
            None => {
                if let Some(next) = choose_cell(board) {
                    stack.push(SearchNode::new(next, board.mark()));
                    stats.max_depth = stats.max_depth.max(stack.len());
                }
            }
        }
    }
    Ok(solutions)
}

/// Unknown cell whose row or column has the fewest unknowns left; first in row-major order on ties.
pub fn choose_cell(board: &Board<'_>) -> Option<Pos> {
    let rows: Vec<usize> = (0..board.height()).map(|r| board.row_unknowns(r)).collect();
    let columns: Vec<usize> = (0..board.width()).map(|c| board.column_unknowns(c)).collect();
    (0..board.height())
        .flat_map(|r| (0..board.width()).map(move |c| Pos { r, c }))
        .filter(|&p| !board.get(p).is_known())
        .min_by_key(|p| rows[p.r].min(columns[p.c]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clues::Clues, grid::GridLimits};
    use std::time::Duration;

    fn clues_of(text: &str) -> Clues { Clues::generate(&Grid::from_text(text, GridLimits::default()).unwrap()) }

    #[test]
    fn finds_both_diagonals() {
        let clues = clues_of("#.\n.#");
        let mut board = Board::new(&clues);
        let mut stats = SolveStats::default();
        let found = search(&mut board, &Deadline::unbounded(), &mut stats).unwrap();
        assert_eq!(found.len(), 2);
        assert_ne!(found[0], found[1]);
        assert_eq!(stats.guesses, 2);
        assert_eq!(stats.max_depth, 1);
    }

    #[test]
    fn prefers_most_constrained_line() {
        let clues = clues_of("#.\n.#");
        let mut board = Board::new(&clues);
        board.assign(Pos { r: 1, c: 1 }, Cell::Filled);
        assert_eq!(choose_cell(&board), Some(Pos { r: 0, c: 1 }));
    }

    #[test]
    fn expired_deadline_aborts_before_guessing() {
        let clues = clues_of("#.\n.#");
        let mut board = Board::new(&clues);
        let mut stats = SolveStats::default();
        let res = search(&mut board, &Deadline::start(Duration::ZERO), &mut stats);
        assert_eq!(res, Err(Halt::Timeout));
        assert_eq!(stats.guesses, 0);
    }
}
