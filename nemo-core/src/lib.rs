pub mod clues;
pub mod config;
pub mod deadline;
pub mod difficulty;
pub mod error;
pub mod fingerprint;
pub mod grid;
pub mod line;
pub mod propagate;
pub mod search;
pub mod solver;
pub mod validate;

pub use clues::{Clue, Clues};
pub use config::ValidatorConfig;
pub use deadline::Deadline;
pub use difficulty::{ContentStyle, Difficulty, DifficultyCategory, GridTag, ShapeScores};
pub use error::{ClueError, ConfigError, GridError, ValidationError};
pub use fingerprint::{fingerprint, Checksum};
pub use grid::{Grid, GridLimits, Pos};
pub use solver::{classify, OverlapSolver, PuzzleSolver, SolveReport, SolveStats, Verdict};
pub use validate::{StructuralWarning, ValidationResult, Validator};
