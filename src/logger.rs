use anyhow::Result;
use chrono::Local;
use colored::*;
use nemo_core::ValidationResult;
use std::{fs::{self, File}, io::Write, path::PathBuf};

use crate::report::{render_report, verdict_label};

/// Writes one `report(N).txt` per validation and echoes a summary to stdout.
pub struct DevLogger {
    dir: PathBuf,
    color: bool,
    max_logs: usize,
    counter: usize,
}

impl DevLogger {
    pub fn new(dir: impl Into<PathBuf>, color: bool, max_logs: usize) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, color, max_logs, counter: 0 })
    }

    pub fn log(&mut self, title: &str, details: &str) -> Result<Option<PathBuf>> {
        if self.max_logs != 0 && self.counter >= self.max_logs { return Ok(None); }
        self.counter += 1;
        let path = self.dir.join(format!("report({}).txt", self.counter));

        let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut f = File::create(&path)?;
        writeln!(f, "[{}] {}\n\n{}", ts, title, details)?;
        log::debug!("devlog written to {}", path.display());
        Ok(Some(path))
    }

    pub fn log_validation(&mut self, source: &str, res: &ValidationResult) -> Result<Option<PathBuf>> {
        let path = self.log(&format!("Validation of {source}"), &render_report(res))?;
        if self.color {
            println!("{} {} {}", "➤".blue().bold(), source.bold(), verdict_label(res.verdict, true));
        } else {
            println!("➤ {} {}", source, verdict_label(res.verdict, false));
        }
        Ok(path)
    }

    pub fn written(&self) -> usize { self.counter }
}
