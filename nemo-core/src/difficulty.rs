use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::{grid::{Grid, Pos}, solver::SolveStats};

pub const DENSE_THRESHOLD: f64 = 0.5;
pub const MINIMAL_THRESHOLD: f64 = 0.2;
pub const SYMMETRY_THRESHOLD: f64 = 0.75;
pub const TEXTUAL_THRESHOLD: f64 = 0.6;
const SYMBOLIC_SYMMETRY: f64 = 0.85;
const SYMBOLIC_MAX_TEXT: f64 = 0.8;
const ASCII_THRESHOLD: f64 = 0.5;
const MIXED_DENSITY: f64 = 0.55;
pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyCategory { Easy, Medium, Hard, Expert }

impl DifficultyCategory {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 3.0 => Self::Easy,
            s if s < 6.0 => Self::Medium,
            s if s < 8.0 => Self::Hard,
            _ => Self::Expert,
        }
    }
}

impl Display for DifficultyCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Self::Easy => "EASY", Self::Medium => "MEDIUM", Self::Hard => "HARD", Self::Expert => "EXPERT" })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridTag { Small, Medium, Large, Dense, Sparse, Textual, Symmetrical, Minimal }

impl Display for GridTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Dense => "dense",
            Self::Sparse => "sparse",
            Self::Textual => "textual",
            Self::Symmetrical => "symmetrical",
            Self::Minimal => "minimal",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStyle { Symbolic, Letterform, CliAscii, Mixed, GenericPixel }

impl Display for ContentStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Symbolic => "SYMBOLIC",
            Self::Letterform => "LETTERFORM",
            Self::CliAscii => "CLI_ASCII",
            Self::Mixed => "MIXED",
            Self::GenericPixel => "GENERIC_PIXEL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeScores {
    pub text: f64,
    pub ascii: f64,
    pub symmetry: f64,
    pub density: f64,
}

impl ShapeScores {
    pub fn of(grid: &Grid) -> Self {
        Self { text: text_score(grid), ascii: ascii_score(grid), symmetry: symmetry_score(grid), density: grid.density() }
    }

    pub fn style(&self) -> ContentStyle {
        if self.symmetry > SYMBOLIC_SYMMETRY && self.text < SYMBOLIC_MAX_TEXT {
            ContentStyle::Symbolic
        } else if self.text > TEXTUAL_THRESHOLD {
            ContentStyle::Letterform
        } else if self.ascii > ASCII_THRESHOLD {
            ContentStyle::CliAscii
        } else if self.density > MIXED_DENSITY {
            ContentStyle::Mixed
        } else {
            ContentStyle::GenericPixel
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub density: f64,
    pub guesses: usize,
    pub max_depth: usize,
    pub area: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub score: f64,
    pub category: DifficultyCategory,
    pub tags: Vec<GridTag>,
    pub style: ContentStyle,
    pub shape: ShapeScores,
    pub estimated_minutes: u32,
}

impl Difficulty {
    pub fn assess(grid: &Grid, stats: &SolveStats) -> Self {
        let inputs = ScoreInputs { density: grid.density(), guesses: stats.guesses, max_depth: stats.max_depth, area: grid.area() };
        let score = score(&inputs);
        let shape = ShapeScores::of(grid);
        Self {
            score,
            category: DifficultyCategory::from_score(score),
            tags: tags_for(grid, &shape),
            style: shape.style(),
            shape,
            estimated_minutes: estimated_minutes(grid.area(), score),
        }
    }
}

/// Normalized to `[0, MAX_SCORE]`, two decimals. Guessing dominates; size, depth and how
/// close the fill ratio sits to one half make up the rest.
pub fn score(inputs: &ScoreInputs) -> f64 {
    let area = inputs.area.max(1) as f64;
    let size = (area.sqrt() / 50.0).min(1.0);
    let search = ((inputs.guesses as f64).ln_1p() / area.ln_1p()).min(1.0);
    let depth = (inputs.max_depth as f64 / area.sqrt()).min(1.0);
    let balance = 1.0 - ((inputs.density - 0.5).abs() * 2.0).min(1.0);
    let raw = MAX_SCORE * (0.3 * size + 0.4 * search + 0.15 * depth + 0.15 * balance);
    (raw.clamp(0.0, MAX_SCORE) * 100.0).round() / 100.0
}

pub fn estimated_minutes(area: usize, score: f64) -> u32 {
    ((area as f64 / 20.0) * (1.0 + score / 5.0)).ceil().max(1.0) as u32
}

pub fn grid_tags(grid: &Grid) -> Vec<GridTag> { tags_for(grid, &ShapeScores::of(grid)) }

fn tags_for(grid: &Grid, shape: &ShapeScores) -> Vec<GridTag> {
    let mut tags = Vec::with_capacity(5);
    let side = grid.width().max(grid.height());
    tags.push(match side { s if s > 35 => GridTag::Large, s if s >= 20 => GridTag::Medium, _ => GridTag::Small });
    tags.push(if shape.density > DENSE_THRESHOLD { GridTag::Dense } else { GridTag::Sparse });
    if shape.text > TEXTUAL_THRESHOLD { tags.push(GridTag::Textual); }
    if shape.symmetry > SYMMETRY_THRESHOLD { tags.push(GridTag::Symmetrical); }
    if shape.density < MINIMAL_THRESHOLD { tags.push(GridTag::Minimal); }
    tags
}

/// Mean of the share of columns that are neither empty nor full and the number of
/// row runs against `width / 2` runs per row.
pub fn text_score(grid: &Grid) -> f64 {
    let (w, h) = (grid.width(), grid.height());
    let strokes = (0..w)
        .filter(|&c| {
            let filled = grid.column(c).filter(|&f| f).count();
            filled > 0 && filled < h
        })
        .count();
    let stroke_ratio = strokes as f64 / w as f64;

    let runs: usize = (0..h).map(|r| grid.row(r).iter().dedup().filter(|&&f| f).count()).sum();
    let per_row = (w / 2).max(1);
    let segments = (runs as f64 / (h * per_row) as f64).min(1.0);

    ((stroke_ratio + segments) / 2.0).clamp(0.0, 1.0)
}

pub fn ascii_score(grid: &Grid) -> f64 {
    let w = grid.width();
    if w <= 1 { return 0.0; }
    let transitions: usize = (0..grid.height())
        .map(|r| grid.row(r).windows(2).filter(|pair| pair[0] != pair[1]).count())
        .sum();
    (transitions as f64 / (grid.height() * (w - 1)) as f64).min(1.0)
}

pub fn symmetry_score(grid: &Grid) -> f64 {
    let (w, h) = (grid.width(), grid.height());
    let matches: usize = grid
        .iterate_cells()
        .map(|p| {
            let here = grid.get(p);
            let mirrored_c = grid.get(Pos { r: p.r, c: w - 1 - p.c });
            let mirrored_r = grid.get(Pos { r: h - 1 - p.r, c: p.c });
            usize::from(here == mirrored_c) + usize::from(here == mirrored_r)
        })
        .sum();
    matches as f64 / (2 * grid.area()) as f64
}
