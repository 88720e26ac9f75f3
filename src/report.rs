use colored::*;
use itertools::Itertools;
use nemo_core::{Clues, StructuralWarning, ValidationResult, Verdict};

pub fn render_clues(clues: &Clues) -> String {
    let mut s = String::new();
    s.push_str("Rows:\n");
    for (i, clue) in clues.rows.iter().enumerate() { s.push_str(&format!("  {:>2}: {}\n", i + 1, clue)); }
    s.push_str("Columns:\n");
    for (i, clue) in clues.columns.iter().enumerate() { s.push_str(&format!("  {:>2}: {}\n", i + 1, clue)); }
    s
}

pub fn render_warning(w: &StructuralWarning) -> String {
    match w {
        StructuralWarning::IsolatedCell(p) => format!("isolated filled cell at r{},c{}", p.r + 1, p.c + 1),
        StructuralWarning::BlankGrid => "grid has no filled cells".to_string(),
    }
}

/// Plain-text report; what ends up in devlog files.
pub fn render_report(res: &ValidationResult) -> String {
    let d = &res.difficulty;
    let mut s = String::new();
    s.push_str(&format!("Size: {}x{}\n", res.width, res.height));
    s.push_str(&format!("Verdict: {} ({} solution(s) found)\n", res.verdict, res.solutions_found));
    s.push_str(&format!("Guesses: {}, max depth: {}, elapsed: {:?}\n", res.guesses, res.max_depth, res.elapsed));
    s.push_str(&format!("Difficulty: {:.2} {} (~{} min) [{}]\n", d.score, d.category, d.estimated_minutes, d.tags.iter().join(", ")));
    s.push_str(&format!("Style: {} (text {:.2}, ascii {:.2}, symmetry {:.2})\n", d.style, d.shape.text, d.shape.ascii, d.shape.symmetry));
    s.push_str(&format!("Checksum: {}\n", res.checksum));
    if !res.warnings.is_empty() {
        s.push_str("Warnings:\n");
        for w in &res.warnings { s.push_str(&format!("  - {}\n", render_warning(w))); }
    }
    s.push_str(&render_clues(&res.clues));
    s
}

pub fn verdict_label(verdict: Verdict, color: bool) -> String {
    let label = verdict.to_string().to_uppercase();
    if !color { return label; }
    match verdict {
        Verdict::Unique => label.green().bold().to_string(),
        Verdict::Ambiguous => label.yellow().bold().to_string(),
        Verdict::Unsolvable | Verdict::Timeout => label.red().bold().to_string(),
    }
}
