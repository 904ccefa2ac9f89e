//! sheetlint CLI tool.
//!
//! Usage:
//! ```bash
//! sheetlint check [OPTIONS] [PATH]
//! sheetlint classify VALUE
//! sheetlint list-rules
//! sheetlint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Stylesheet linter with a typed value tokenizer
#[derive(Parser)]
#[command(name = "sheetlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SHEETLINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// File or directory to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated)
        #[arg(long)]
        rules: Option<String>,

        /// Maximum number of findings per budget scope
        #[arg(long)]
        max_errors: Option<usize>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Classify a property value and print its tokens as JSON
    Classify {
        /// Raw value, e.g. "1px solid #aaa"
        value: String,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
    /// Annotated source snippets.
    Pretty,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            max_errors,
            exclude,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            let options = commands::check::CheckOptions {
                rules,
                max_errors,
                exclude,
            };
            let has_findings = commands::check::run(&path, format, options, &source)?;
            Ok(if has_findings {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Classify { value } => {
            commands::classify::run(&value)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
