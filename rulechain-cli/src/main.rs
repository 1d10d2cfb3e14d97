//! rulechain CLI - check JSON records against rule-chain schemas.
//!
//! # Commands
//!
//! - `rulechain check --schema <file> --record <file|->` - Validate records
//! - `rulechain parse "<chain>"` - Show the directives of a rule chain
//! - `rulechain rules` - List built-in rules

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rulechain_config::Settings;
use rulechain_log::{Format, Level, LogConfig};
use rulechain_validation::ErrorMode;
use std::path::PathBuf;

mod commands;
mod error;

use commands::{check, parse, rules};
use error::{CliError, CliResult};

/// rulechain CLI - rule-chain record validation
#[derive(Parser)]
#[command(name = "rulechain")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Validate records against rule-chain schemas")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} rulechain check --schema signup.toml --record user.json\n  {} cat users.json | rulechain check -s signup.toml -r - --json\n  {} rulechain parse \"required|string|min:8\"",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (JSON, TOML or .env)
    #[arg(short, long, global = true, env = "RULECHAIN_CONFIG")]
    config: Option<PathBuf>,

    /// `.env` file to load before reading settings (default: ./.env if present)
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate JSON records against a schema
    #[command(alias = "c")]
    Check(CheckArgs),

    /// Parse a rule-chain encoding and print its directives
    #[command(alias = "p")]
    Parse(ParseArgs),

    /// List built-in rules
    Rules {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// Schema file (JSON or TOML)
    #[arg(short, long)]
    schema: PathBuf,

    /// Record file, or `-` to read stdin. A JSON array is checked as a batch.
    #[arg(short, long, default_value = "-")]
    record: String,

    /// Error mode; overrides the settings file and RULECHAIN_VALIDATION_MODE
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ParseArgs {
    /// Rule-chain encoding, e.g. "required|numeric|min:10"
    chain: String,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// First failing rule per field
    #[value(alias = "first", alias = "fail_fast")]
    FailFast,
    /// Every failing rule per field
    #[value(alias = "all")]
    Accumulate,
}

impl From<ModeArg> for ErrorMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FailFast => ErrorMode::FailFast,
            ModeArg::Accumulate => ErrorMode::Accumulate,
        }
    }
}

fn init_logging(settings: &Settings, verbose: bool, no_color: bool) {
    let mut config = LogConfig::from_env();

    if let Some(level) = settings.log_level.as_deref().and_then(Level::from_str) {
        config = config.with_level(level);
    }
    if let Some(format) = settings.log_format.as_deref().and_then(Format::from_str) {
        config = config.with_format(format);
    }
    if no_color {
        config = config.with_color(false);
    }

    config.with_debug(verbose).init();
}

fn run(cli: Cli) -> CliResult<()> {
    let settings = Settings::load_with_dotenv(cli.config.as_deref(), cli.env_file.as_deref())?;
    init_logging(&settings, cli.verbose, cli.no_color);

    match cli.command {
        Commands::Check(args) => {
            if args.record.is_empty() {
                return Err(CliError::InvalidArgument(
                    "--record needs a file path or `-`".to_string(),
                ));
            }

            let mode = args.mode.map(ErrorMode::from).unwrap_or(settings.mode());
            check::execute(&check::CheckArgs {
                schema: args.schema,
                record: args.record,
                mode,
                json: args.json,
                quiet: cli.quiet,
            })
        }
        Commands::Parse(args) => parse::execute(&args.chain, args.json),
        Commands::Rules { json } => rules::execute(json),
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle color preferences
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli) {
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}
