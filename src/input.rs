use anyhow::{Context, Result};
use nemo_core::{Grid, GridLimits};
use std::{fs, path::PathBuf};

pub fn read_input(input: &Option<PathBuf>) -> Result<String> {
    match input {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => {
            use std::io::{self, Read};
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Lines starting with `//` are notes and never part of the picture.
pub fn parse_grid(text: &str, limits: GridLimits) -> Result<Grid> {
    let picture: String = text.lines().filter(|l| !l.trim_start().starts_with("//")).map(|l| format!("{l}\n")).collect();
    Grid::from_text(&picture, limits).context("parse grid")
}

pub fn source_name(input: &Option<PathBuf>) -> String {
    input.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "stdin".to_string())
}
