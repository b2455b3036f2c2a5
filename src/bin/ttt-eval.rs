//! ttt-eval CLI - exhaustive minimax evaluation of NxN tic-tac-toe records
//!
//! This CLI provides a unified interface for:
//! - Evaluating a dataset of game records under perfect play
//! - Generating datasets of reachable positions
//! - Solving a single position move by move

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ttt_eval::cli::{
    commands::{evaluate, generate, solve},
    config::FileConfig,
};

#[derive(Parser)]
#[command(name = "ttt-eval")]
#[command(version, about = "Minimax evaluation of NxN tic-tac-toe game records", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play every record of a dataset out and report outcome statistics
    Evaluate(evaluate::EvaluateArgs),

    /// Generate a dataset of reachable non-terminal positions
    Generate(generate::GenerateArgs),

    /// Score the moves of a single record and play it out
    Solve(solve::SolveArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FileConfig::default(),
    };

    let default_level = if cli.verbose || config.common.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Evaluate(args) => evaluate::execute(args, &config),
        Commands::Generate(args) => generate::execute(args, &config),
        Commands::Solve(args) => solve::execute(args, &config),
    }
}
