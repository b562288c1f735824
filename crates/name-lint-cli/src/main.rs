//! name-lint CLI tool.
//!
//! Usage:
//! ```bash
//! name-lint check [OPTIONS] [PATHS]...
//! name-lint list-rules
//! name-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Linter for file and directory naming conventions
#[derive(Parser)]
#[command(name = "name-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a configuration file (repeat to merge several, later wins)
    #[arg(short, long, global = true)]
    config: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint file and directory names
    Check {
        /// Only validate these paths (relative to the work dir) and their contents
        paths: Vec<String>,

        /// Directory to lint (default: current directory)
        #[arg(short, long, default_value = ".")]
        workdir: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Report violations on stdout and exit successfully
        #[arg(long)]
        warn: bool,
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
    /// `<path> failed for rules: ...` lines and a summary.
    #[default]
    Text,
    /// JSON object mapping each path to its failed rules.
    Json,
    /// One line per failed rule.
    Compact,
}

fn main() -> Result<()> {
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

    match cli.command {
        Commands::Check {
            paths,
            workdir,
            format,
            warn,
        } => {
            let source = config_resolver::resolve(&workdir, &cli.config);
            commands::check::run(&workdir, &paths, format, warn, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
