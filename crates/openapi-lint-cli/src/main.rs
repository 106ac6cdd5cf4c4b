//! openapi-lint CLI tool.
//!
//! Usage:
//! ```bash
//! openapi-lint check --inputspec <PATH> [--policyfile <FILE>] [--severity <LEVEL>]
//! openapi-lint list-rules
//! openapi-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod report;

/// Policy-based style linter for OpenAPI 3 documents
#[derive(Parser)]
#[command(name = "openapi-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the policy file (JSON, or TOML with a .toml extension)
    #[arg(short, long, global = true, alias = "config")]
    policyfile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check spec files against the policy
    Check {
        /// Spec file, directory of spec files, glob pattern or URL
        #[arg(short, long)]
        inputspec: String,

        /// Lowest severity to report: hint, information, warning, error
        #[arg(short, long, default_value = "hint", env = "OPENAPI_LINT_SEVERITY")]
        severity: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available rules
    ListRules,

    /// Write a default policy file to the current directory
    Init {
        /// Overwrite an existing policy file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", report::render(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check {
            inputspec,
            severity,
            format,
        } => {
            let cwd = std::env::current_dir()?;
            let source = config_resolver::resolve(&cwd, cli.policyfile.as_deref());
            commands::check::run(&inputspec, &severity, format, &source)
        }
        Commands::ListRules => commands::list_rules::run(),
        Commands::Init { force } => {
            let cwd = std::env::current_dir()?;
            commands::init::run(&cwd, force)
        }
    }
}
