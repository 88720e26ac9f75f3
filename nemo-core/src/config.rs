use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::{error::ConfigError, grid::GridLimits};

pub const DEFAULT_TIME_BUDGET_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub time_budget_ms: u64,
    pub max_width: usize,
    pub max_height: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        let limits = GridLimits::default();
        Self { time_budget_ms: DEFAULT_TIME_BUDGET_MS, max_width: limits.max_width, max_height: limits.max_height }
    }
}

impl ValidatorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn time_budget(&self) -> Duration { Duration::from_millis(self.time_budget_ms) }
    pub fn limits(&self) -> GridLimits { GridLimits { max_width: self.max_width, max_height: self.max_height } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg: ValidatorConfig = serde_json::from_str(r#"{ "time_budget_ms": 500 }"#).unwrap();
        assert_eq!(cfg.time_budget(), Duration::from_millis(500));
        assert_eq!(cfg.limits(), GridLimits::default());
    }

    #[test]
    fn default_budget_is_thirty_seconds() {
        assert_eq!(ValidatorConfig::default().time_budget(), Duration::from_secs(30));
    }
}
