use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Unknown,
    Blank,
    Filled,
}

impl Cell {
    pub fn is_known(self) -> bool { self != Cell::Unknown }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("line cannot satisfy its clue")]
pub struct Contradiction;

#[derive(Debug, Clone)]
pub struct LineState<'a> {
    pub clue: &'a [usize],
    pub cells: Vec<Cell>,
}

impl<'a> LineState<'a> {
    pub fn new(clue: &'a [usize], cells: Vec<Cell>) -> Self { Self { clue, cells } }

    /// Applies the overlap deduction in place and returns the positions that became known.
    pub fn deduce(&mut self) -> Result<Vec<usize>, Contradiction> {
        let solved = solve_line(self.clue, &self.cells)?;
        let mut forced = Vec::new();
        for (i, (cell, new)) in self.cells.iter_mut().zip(solved).enumerate() {
            if *cell != new { *cell = new; forced.push(i); }
        }
        Ok(forced)
    }

    pub fn unknowns(&self) -> usize { self.cells.iter().filter(|c| !c.is_known()).count() }
}

/// Overlap method: a cell inside both the leftmost and rightmost span of a run is filled,
/// a cell outside every run's reachable span is blank. Known cells are never changed.
pub fn solve_line(clue: &[usize], line: &[Cell]) -> Result<Vec<Cell>, Contradiction> {
    let len = line.len();
    let left = leftmost_starts(clue, line).ok_or(Contradiction)?;

    let rev_line: Vec<Cell> = line.iter().rev().copied().collect();
    let rev_clue: Vec<usize> = clue.iter().rev().copied().collect();
    let right: Vec<usize> = leftmost_starts(&rev_clue, &rev_line)
        .ok_or(Contradiction)?
        .iter()
        .zip(&rev_clue)
        .map(|(&s, &run)| len - s - run)
        .rev()
        .collect();

    let mut out = line.to_vec();
    let mut reachable = vec![false; len];
    for ((&l, &r), &run) in left.iter().zip(&right).zip(clue) {
        debug_assert!(l <= r);
        if r < l + run {
            out[r..l + run].fill(Cell::Filled);
        }
        reachable[l..r + run].fill(true);
    }
    for (cell, _) in out.iter_mut().zip(&reachable).filter(|(_, &reach)| !reach) {
        *cell = Cell::Blank;
    }

    if line.iter().zip(&out).any(|(&was, &now)| was.is_known() && was != now) {
        return Err(Contradiction);
    }
    Ok(out)
}

/// Start of every run packed as far left as the known cells allow, or `None` when no
/// placement exists at all.
fn leftmost_starts(clue: &[usize], line: &[Cell]) -> Option<Vec<usize>> {
    let len = line.len();
    let k = clue.len();
    let mut blanks = vec![0usize; len + 1];
    let mut filled = vec![0usize; len + 1];
    for (i, &cell) in line.iter().enumerate() {
        blanks[i + 1] = blanks[i] + usize::from(cell == Cell::Blank);
        filled[i + 1] = filled[i] + usize::from(cell == Cell::Filled);
    }

    // a run of `run` cells at `start` needs no blank inside and no filled cell right after;
    // yields where the next run may begin
    let place = |run: usize, start: usize| -> Option<usize> {
        let end = start + run;
        (end <= len && blanks[end] == blanks[start] && (end == len || line[end] != Cell::Filled))
            .then(|| (end + 1).min(len))
    };

    // fits[j][i]: runs j.. can be laid out within cells i..
    let mut fits = vec![vec![false; len + 1]; k + 1];
    for i in 0..=len { fits[k][i] = filled[len] == filled[i]; }
    for j in (0..k).rev() {
        for i in (0..len).rev() {
            let here = place(clue[j], i).is_some_and(|next| fits[j + 1][next]);
            fits[j][i] = here || (line[i] != Cell::Filled && fits[j][i + 1]);
        }
    }
    if !fits[0][0] { return None; }

    let mut starts = Vec::with_capacity(k);
    let mut from = 0;
    for (j, &run) in clue.iter().enumerate() {
        let mut start = from;
        loop {
            match place(run, start) {
                Some(next) if fits[j + 1][next] => { from = next; break; }
                _ => start += 1,
            }
        }
        starts.push(start);
    }
    Some(starts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(s: &str) -> Vec<Cell> {
        s.chars().map(|ch| match ch { '#' => Cell::Filled, '.' => Cell::Blank, _ => Cell::Unknown }).collect()
    }

    #[test]
    fn overlap_fills_middle() {
        assert_eq!(solve_line(&[3], &line("?????")).unwrap(), line("??#??"));
        assert_eq!(solve_line(&[2, 2], &line("?????")).unwrap(), line("##.##"));
        assert_eq!(solve_line(&[1], &line("?????")).unwrap(), line("?????"));
    }

    #[test]
    fn empty_clue_blanks_line() {
        assert_eq!(solve_line(&[], &line("????")).unwrap(), line("...."));
        assert_eq!(solve_line(&[], &line("??#?")), Err(Contradiction));
    }

    #[test]
    fn known_blank_acts_as_barrier() {
        assert_eq!(solve_line(&[2], &line("?.???")).unwrap(), line("..?#?"));
        assert_eq!(solve_line(&[3], &line("??.??")), Err(Contradiction));
    }

    #[test]
    fn known_filled_anchors_run() {
        assert_eq!(solve_line(&[1], &line("???#?")).unwrap(), line("...#."));
        assert_eq!(solve_line(&[1, 1], &line("#????")).unwrap(), line("#.???"));
        assert_eq!(solve_line(&[2], &line("#??#?")), Err(Contradiction));
    }

    #[test]
    fn deduction_is_idempotent() {
        let once = solve_line(&[3, 1], &line("??????")).unwrap();
        assert_eq!(once, line("?##???"));
        assert_eq!(solve_line(&[3, 1], &once).unwrap(), once);
    }

    #[test]
    fn line_state_reports_forced_positions() {
        let clue = [4];
        let mut state = LineState::new(&clue, line("?????"));
        assert_eq!(state.deduce().unwrap(), vec![1, 2, 3]);
        assert_eq!(state.unknowns(), 2);
        assert_eq!(state.deduce().unwrap(), Vec::<usize>::new());
    }
}
