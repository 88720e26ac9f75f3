use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use nemo::{input::{parse_grid, read_input, source_name}, logger::DevLogger, report::{render_clues, render_report}};
use nemo_core::{fingerprint, Clues, ValidationError, ValidationResult, Validator, ValidatorConfig, Verdict};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nemo", version, about = "Nonogram validator: clues, uniqueness, difficulty and fingerprints")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prove the grid's clues have exactly one solution and report difficulty and checksum
    Validate(ValidateArgs),
    /// Print the row and column clues of the grid
    Clues(InputArgs),
    /// Print the grid's checksum
    Fingerprint(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Grid file: one row per line, '#' filled and '.' blank. If omitted, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// JSON file with time_budget_ms, max_width, max_height
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured time budget
    #[arg(long)]
    budget_ms: Option<u64>,

    /// Print the full result as JSON
    #[cfg(feature = "json")]
    #[arg(long)]
    json: bool,

    /// Colored console summary
    #[arg(long)]
    color: bool,

    /// Directory for report devlogs
    #[arg(long, default_value = "devlogs")]
    devlog_dir: PathBuf,

    /// Maximum devlogs to write (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    max_logs: usize,
}

fn load_config(args: &ValidateArgs) -> Result<ValidatorConfig> {
    let mut config = match &args.config {
        Some(p) => ValidatorConfig::load(p).with_context(|| format!("loading config {}", p.display()))?,
        None => ValidatorConfig::default(),
    };
    if let Some(ms) = args.budget_ms { config.time_budget_ms = ms; }
    Ok(config)
}

fn validate(args: ValidateArgs) -> Result<()> {
    let config = load_config(&args)?;
    let text = read_input(&args.input.input)?;
    let grid = parse_grid(&text, config.limits())?;
    let source = source_name(&args.input.input);

    let res = match Validator::new(config).validate(&grid) {
        Ok(res) => res,
        Err(e @ ValidationError::Timeout { .. }) => bail!("{source}: {e}"),
        Err(e) => return Err(e).context(source),
    };

    if print_json(&args, &res)? { return finish(res.verdict); }

    let mut logger = DevLogger::new(&args.devlog_dir, args.color, args.max_logs)?;
    logger.log_validation(&source, &res)?;
    println!("\n{}", render_report(&res));
    finish(res.verdict)
}

#[cfg(feature = "json")]
fn print_json(args: &ValidateArgs, res: &ValidationResult) -> Result<bool> {
    if !args.json { return Ok(false); }
    println!("{}", serde_json::to_string_pretty(res)?);
    Ok(true)
}

#[cfg(not(feature = "json"))]
fn print_json(_args: &ValidateArgs, _res: &ValidationResult) -> Result<bool> { Ok(false) }

fn finish(verdict: Verdict) -> Result<()> {
    if verdict != Verdict::Unique { bail!("puzzle rejected: {verdict}") }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => validate(args),
        Command::Clues(args) => {
            let grid = parse_grid(&read_input(&args.input)?, ValidatorConfig::default().limits())?;
            print!("{}", render_clues(&Clues::generate(&grid)));
            Ok(())
        }
        Command::Fingerprint(args) => {
            let grid = parse_grid(&read_input(&args.input)?, ValidatorConfig::default().limits())?;
            println!("{}", fingerprint(&grid));
            Ok(())
        }
    }
}
