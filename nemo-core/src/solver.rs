use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::{
    clues::{Clue, Clues},
    deadline::Deadline,
    grid::Grid,
    propagate::{propagate, Board},
    search::search,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt { Contradiction, Timeout }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict { Unsolvable, Unique, Ambiguous, Timeout }

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Unsolvable => "unsolvable",
            Verdict::Unique => "unique",
            Verdict::Ambiguous => "ambiguous",
            Verdict::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStats {
    pub guesses: usize,
    pub max_depth: usize,
    pub line_passes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub verdict: Verdict,
    pub solutions: Vec<Grid>,
    pub stats: SolveStats,
}

impl SolveReport {
    pub fn solutions_found(&self) -> usize { self.solutions.len() }

    pub fn solution(&self) -> Option<&Grid> {
        match self.verdict { Verdict::Unique => self.solutions.first(), _ => None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase { Propagating, Searching, Done(Verdict) }

/// Decides how many pictures a clue set admits. The validator only talks to this trait.
pub trait PuzzleSolver {
    fn name(&self) -> &str;
    fn classify(&self, clues: &Clues, deadline: &Deadline) -> SolveReport;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapSolver;

impl OverlapSolver {
    pub fn new() -> Self { Self }
}

impl PuzzleSolver for OverlapSolver {
    fn name(&self) -> &str { "Overlap + backtracking" }

    fn classify(&self, clues: &Clues, deadline: &Deadline) -> SolveReport {
        let mut board = Board::new(clues);
        let mut stats = SolveStats::default();
        let mut solutions = Vec::new();

        let mut phase = if filled_total(&clues.rows) == filled_total(&clues.columns) {
            Phase::Propagating
        } else {
            debug!("row and column clues disagree on the number of filled cells");
            Phase::Done(Verdict::Unsolvable)
        };
        let verdict = loop {
            phase = match phase {
                Phase::Propagating => {
                    debug!("propagating {}x{} board", clues.width(), clues.height());
                    let lines: Vec<_> = board.all_lines().collect();
                    match propagate(&mut board, lines, deadline, &mut stats) {
                        Err(Halt::Contradiction) => Phase::Done(Verdict::Unsolvable),
                        Err(Halt::Timeout) => Phase::Done(Verdict::Timeout),
                        Ok(()) => match board.to_grid() {
                            Some(grid) => { solutions.push(grid); Phase::Done(Verdict::Unique) }
                            None => Phase::Searching,
                        },
                    }
                }
                Phase::Searching => {
                    let unknown = board.cells().iter().filter(|c| !c.is_known()).count();
                    debug!("fixpoint left {unknown} unknown cells, searching");
                    match search(&mut board, deadline, &mut stats) {
                        Err(_) => Phase::Done(Verdict::Timeout),
                        Ok(found) => {
                            solutions = found;
                            Phase::Done(match solutions.len() {
                                0 => Verdict::Unsolvable,
                                1 => Verdict::Unique,
                                _ => Verdict::Ambiguous,
                            })
                        }
                    }
                }
                Phase::Done(verdict) => break verdict,
            };
        };

        if verdict == Verdict::Timeout { solutions.clear(); }
        debug!("verdict {verdict} after {} guesses, {} line passes", stats.guesses, stats.line_passes);
        SolveReport { verdict, solutions, stats }
    }
}

fn filled_total(lines: &[Clue]) -> usize { lines.iter().map(Clue::filled).sum() }

pub fn classify(clues: &Clues, deadline: &Deadline) -> SolveReport { OverlapSolver.classify(clues, deadline) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridLimits;
    use std::time::Duration;

    fn grid(text: &str) -> Grid { Grid::from_text(text, GridLimits::default()).unwrap() }

    #[test]
    fn unique_without_guessing() {
        let g = grid("###..\n#..#.\n##.#.\n.#..#\n..###");
        let report = classify(&Clues::generate(&g), &Deadline::unbounded());
        assert_eq!(report.verdict, Verdict::Unique);
        assert_eq!(report.stats.guesses, 0);
        assert_eq!(report.solution(), Some(&g));
    }

    #[test]
    fn unique_after_guessing() {
        let g = grid("....\n..#.\n.##.\n#..#\n#..#");
        let report = classify(&Clues::generate(&g), &Deadline::unbounded());
        assert_eq!(report.verdict, Verdict::Unique);
        assert_eq!(report.solutions_found(), 1);
        assert!(report.stats.guesses > 0);
        assert_eq!(report.solution(), Some(&g));
    }

    #[test]
    fn ambiguous_diagonal() {
        let report = classify(&Clues::generate(&grid("#.\n.#")), &Deadline::unbounded());
        assert_eq!(report.verdict, Verdict::Ambiguous);
        assert_eq!(report.solutions_found(), 2);
        assert_eq!(report.solution(), None);
    }

    #[test]
    fn mismatched_totals_are_unsolvable() {
        let clues = Clues::new(vec![Clue::new(vec![2]), Clue::default()], vec![Clue::new(vec![1]), Clue::default()]).unwrap();
        let report = classify(&clues, &Deadline::unbounded());
        assert_eq!(report.verdict, Verdict::Unsolvable);
        assert!(report.solutions.is_empty());
    }

    #[test]
    fn propagation_contradiction_is_unsolvable() {
        // both totals are 2, but a full row cannot meet two empty columns
        let clues = Clues::new(
            vec![Clue::new(vec![2]), Clue::default()],
            vec![Clue::new(vec![2]), Clue::default()],
        ).unwrap();
        let report = classify(&clues, &Deadline::unbounded());
        assert_eq!(report.verdict, Verdict::Unsolvable);
    }

    #[test]
    fn exhausted_search_is_unsolvable() {
        // totals agree and every line passes on its own, so only guessing shows there is no picture
        let clues = Clues::new(
            vec![Clue::new(vec![1, 1]), Clue::new(vec![1]), Clue::new(vec![1]), Clue::new(vec![1, 1])],
            vec![Clue::new(vec![1]), Clue::new(vec![1]), Clue::new(vec![1, 1]), Clue::new(vec![2])],
        ).unwrap();
        let report = classify(&clues, &Deadline::unbounded());
        assert_eq!(report.verdict, Verdict::Unsolvable);
        assert_eq!(report.solutions_found(), 0);
        assert_eq!(report.stats.guesses, 2);
        assert_eq!(report.stats.max_depth, 1);
    }

    #[test]
    fn zero_budget_times_out_when_search_is_needed() {
        let report = classify(&Clues::generate(&grid("#.\n.#")), &Deadline::start(Duration::ZERO));
        assert_eq!(report.verdict, Verdict::Timeout);
        assert!(report.solutions.is_empty());
    }
}
