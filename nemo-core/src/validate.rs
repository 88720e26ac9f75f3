use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    clues::Clues,
    config::ValidatorConfig,
    deadline::Deadline,
    difficulty::Difficulty,
    error::{GridError, ValidationError},
    fingerprint::{fingerprint, Checksum},
    grid::{Grid, Pos},
    solver::{OverlapSolver, PuzzleSolver, Verdict},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructuralWarning {
    IsolatedCell(Pos),
    BlankGrid,
}

/// Verdict and metadata for one grid. Never produced for a timed-out validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub width: usize,
    pub height: usize,
    pub verdict: Verdict,
    pub solutions_found: usize,
    pub guesses: usize,
    pub max_depth: usize,
    pub elapsed: Duration,
    pub difficulty: Difficulty,
    pub clues: Clues,
    pub checksum: Checksum,
    pub warnings: Vec<StructuralWarning>,
}

impl ValidationResult {
    pub fn is_unique(&self) -> bool { self.verdict == Verdict::Unique }
}

pub struct Validator<S = OverlapSolver> {
    config: ValidatorConfig,
    solver: S,
}

impl Validator<OverlapSolver> {
    pub fn new(config: ValidatorConfig) -> Self { Self { config, solver: OverlapSolver } }
}

impl Default for Validator<OverlapSolver> {
    fn default() -> Self { Self::new(ValidatorConfig::default()) }
}

impl<S: PuzzleSolver> Validator<S> {
    pub fn with_solver(config: ValidatorConfig, solver: S) -> Self { Self { config, solver } }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.config.time_budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn config(&self) -> &ValidatorConfig { &self.config }

    pub fn parse<R: AsRef<str>>(&self, rows: &[R], width: usize, height: usize) -> Result<Grid, GridError> {
        Grid::parse(rows, width, height, self.config.limits())
    }

    pub fn validate_rows<R: AsRef<str>>(&self, rows: &[R], width: usize, height: usize) -> Result<ValidationResult, ValidationError> {
        let grid = self.parse(rows, width, height)?;
        self.validate(&grid)
    }

    pub fn validate(&self, grid: &Grid) -> Result<ValidationResult, ValidationError> {
        let limits = self.config.limits();
        if grid.width() > limits.max_width || grid.height() > limits.max_height {
            return Err(GridError::TooLarge { width: grid.width(), height: grid.height(), max_width: limits.max_width, max_height: limits.max_height }.into());
        }
        let deadline = Deadline::start(self.config.time_budget());
        debug!("validating {}x{} grid with {} (budget {:?})", grid.width(), grid.height(), self.solver.name(), deadline.budget());

        let warnings = structural_warnings(grid);
        let clues = Clues::generate(grid);
        let report = self.solver.classify(&clues, &deadline);
        if report.verdict == Verdict::Timeout {
            return Err(ValidationError::Timeout { elapsed: deadline.elapsed(), budget: deadline.budget() });
        }
        if let Some(solved) = report.solution() {
            if solved != grid { warn!("unique solution differs from the submitted grid"); }
        }

        Ok(ValidationResult {
            width: grid.width(),
            height: grid.height(),
            verdict: report.verdict,
            solutions_found: report.solutions_found(),
            guesses: report.stats.guesses,
            max_depth: report.stats.max_depth,
            elapsed: deadline.elapsed(),
            difficulty: Difficulty::assess(grid, &report.stats),
            clues,
            checksum: fingerprint(grid),
            warnings,
        })
    }
}

pub fn structural_warnings(grid: &Grid) -> Vec<StructuralWarning> {
    if grid.filled_count() == 0 { return vec![StructuralWarning::BlankGrid]; }
    grid.iterate_cells()
        .filter(|&p| grid.get(p) && !has_filled_neighbour(grid, p))
        .map(StructuralWarning::IsolatedCell)
        .collect()
}

fn has_filled_neighbour(grid: &Grid, p: Pos) -> bool {
    let up = p.r > 0 && grid.get(Pos { r: p.r - 1, c: p.c });
    let down = p.r + 1 < grid.height() && grid.get(Pos { r: p.r + 1, c: p.c });
    let left = p.c > 0 && grid.get(Pos { r: p.r, c: p.c - 1 });
    let right = p.c + 1 < grid.width() && grid.get(Pos { r: p.r, c: p.c + 1 });
    up || down || left || right
}
