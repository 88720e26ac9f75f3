use std::collections::VecDeque;

use crate::{
    clues::Clues,
    deadline::Deadline,
    grid::{Grid, Pos},
    line::{Cell, LineState},
    solver::{Halt, SolveStats},
};

pub const DEADLINE_CHECK_INTERVAL: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line { Row(usize), Column(usize) }

/// Cell knowledge for one solve. Every assignment is recorded on a trail so search can
/// roll back to an earlier mark.
#[derive(Debug, Clone)]
pub struct Board<'c> {
    clues: &'c Clues,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    trail: Vec<usize>,
}

impl<'c> Board<'c> {
    pub fn new(clues: &'c Clues) -> Self {
        let (width, height) = (clues.width(), clues.height());
        Self { clues, width, height, cells: vec![Cell::Unknown; width * height], trail: Vec::new() }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn get(&self, p: Pos) -> Cell { self.cells[p.idx(self.width)] }
    pub fn cells(&self) -> &[Cell] { &self.cells }

    pub fn all_lines(&self) -> impl Iterator<Item = Line> {
        (0..self.height).map(Line::Row).chain((0..self.width).map(Line::Column))
    }

    pub fn assign(&mut self, p: Pos, cell: Cell) {
        let idx = p.idx(self.width);
        debug_assert_eq!(self.cells[idx], Cell::Unknown);
        self.cells[idx] = cell;
        self.trail.push(idx);
    }

    pub fn mark(&self) -> usize { self.trail.len() }

    pub fn undo_to(&mut self, mark: usize) {
        for idx in self.trail.drain(mark..) { self.cells[idx] = Cell::Unknown; }
    }

    pub fn is_complete(&self) -> bool { self.cells.iter().all(|c| c.is_known()) }

    pub fn row_unknowns(&self, r: usize) -> usize {
        self.cells[r * self.width..(r + 1) * self.width].iter().filter(|c| !c.is_known()).count()
    }

    pub fn column_unknowns(&self, c: usize) -> usize {
        self.cells.iter().skip(c).step_by(self.width).filter(|c| !c.is_known()).count()
    }

    pub fn to_grid(&self) -> Option<Grid> {
        if !self.is_complete() { return None; }
        Some(Grid::from_cells(self.width, self.height, self.cells.iter().map(|&c| c == Cell::Filled).collect()))
    }

    fn position(&self, line: Line, offset: usize) -> Pos {
        match line { Line::Row(r) => Pos { r, c: offset }, Line::Column(c) => Pos { r: offset, c } }
    }

    fn line_state(&self, line: Line) -> LineState<'c> {
        let clues = self.clues;
        match line {
            Line::Row(r) => LineState::new(clues.rows[r].runs(), self.cells[r * self.width..(r + 1) * self.width].to_vec()),
            Line::Column(c) => LineState::new(clues.columns[c].runs(), self.cells.iter().skip(c).step_by(self.width).copied().collect()),
        }
    }
}

struct WorkQueue {
    queue: VecDeque<Line>,
    rows: Vec<bool>,
    columns: Vec<bool>,
}

impl WorkQueue {
    fn new(width: usize, height: usize) -> Self {
        Self { queue: VecDeque::with_capacity(width + height), rows: vec![false; height], columns: vec![false; width] }
    }

    fn flag(&mut self, line: Line) -> &mut bool {
        match line { Line::Row(r) => &mut self.rows[r], Line::Column(c) => &mut self.columns[c] }
    }

    fn push(&mut self, line: Line) {
        if !std::mem::replace(self.flag(line), true) { self.queue.push_back(line); }
    }

    fn pop(&mut self) -> Option<Line> {
        let line = self.queue.pop_front()?;
        *self.flag(line) = false;
        Some(line)
    }
}

/// Runs line deductions from `dirty` until nothing changes. A forced cell re-queues the
/// line crossing it; the first contradiction ends propagation.
pub fn propagate(board: &mut Board<'_>, dirty: impl IntoIterator<Item = Line>, deadline: &Deadline, stats: &mut SolveStats) -> Result<(), Halt> {
    let mut queue = WorkQueue::new(board.width, board.height);
    for line in dirty { queue.push(line); }

    while let Some(line) = queue.pop() {
        stats.line_passes += 1;
        if stats.line_passes % DEADLINE_CHECK_INTERVAL == 0 && deadline.expired() { return Err(Halt::Timeout); }

        let mut state = board.line_state(line);
        let forced = state.deduce().map_err(|_| Halt::Contradiction)?;
        for offset in forced {
            let p = board.position(line, offset);
            board.assign(p, state.cells[offset]);
            queue.push(match line { Line::Row(_) => Line::Column(p.c), Line::Column(_) => Line::Row(p.r) });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clues::Clue;
    use crate::grid::GridLimits;

    fn clues_of(text: &str) -> Clues { Clues::generate(&Grid::from_text(text, GridLimits::default()).unwrap()) }

    #[test]
    fn reaches_full_solution_without_guessing() {
        let grid = Grid::from_text("###..\n#..#.\n##.#.\n.#..#\n..###", GridLimits::default()).unwrap();
        let clues = Clues::generate(&grid);
        let mut board = Board::new(&clues);
        let mut stats = SolveStats::default();
        let lines: Vec<Line> = board.all_lines().collect();
        propagate(&mut board, lines, &Deadline::unbounded(), &mut stats).unwrap();
        assert_eq!(board.to_grid(), Some(grid));
        assert!(stats.line_passes >= 10);
    }

    #[test]
    fn stalls_on_symmetric_clues() {
        let clues = clues_of("#.\n.#");
        let mut board = Board::new(&clues);
        let lines: Vec<Line> = board.all_lines().collect();
        propagate(&mut board, lines, &Deadline::unbounded(), &mut SolveStats::default()).unwrap();
        assert!(!board.is_complete());
        assert_eq!(board.row_unknowns(0), 2);
        assert_eq!(board.column_unknowns(1), 2);
    }

    #[test]
    fn detects_inconsistent_clues() {
        let clues = Clues::new(vec![Clue::new(vec![2]), Clue::default()], vec![Clue::new(vec![1]), Clue::default()]).unwrap();
        let mut board = Board::new(&clues);
        let lines: Vec<Line> = board.all_lines().collect();
        let res = propagate(&mut board, lines, &Deadline::unbounded(), &mut SolveStats::default());
        assert_eq!(res, Err(Halt::Contradiction));
    }

    #[test]
    fn undo_restores_unknowns() {
        let clues = clues_of("#.\n.#");
        let mut board = Board::new(&clues);
        let mark = board.mark();
        board.assign(Pos { r: 0, c: 0 }, Cell::Filled);
        propagate(&mut board, [Line::Row(0), Line::Column(0)], &Deadline::unbounded(), &mut SolveStats::default()).unwrap();
        assert!(board.is_complete());
        board.undo_to(mark);
        assert!(board.cells().iter().all(|&c| c == Cell::Unknown));
    }
}
