pub mod input;
pub mod logger;
pub mod report;

pub use nemo_core::{Grid, ValidationResult, Validator, ValidatorConfig, Verdict};
