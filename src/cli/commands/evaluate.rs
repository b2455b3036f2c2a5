//! Evaluate command - play every record of a dataset out under perfect play

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    batch::{BatchRunner, BatchSummary, JsonlObserver, ProgressObserver},
    cli::{
        config::FileConfig,
        output::{format_number, format_share, print_kv, print_section},
    },
    dataset::{DatasetReader, RecordFormat},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a dataset of game records")]
pub struct EvaluateArgs {
    /// Path to the dataset file
    pub dataset: PathBuf,

    /// Board side length (overrides the config file)
    #[arg(long, short = 's')]
    pub size: Option<usize>,

    /// Disable alpha-beta pruning
    #[arg(long)]
    pub no_pruning: bool,

    /// Dataset encoding: ascii or bitset (overrides the config file)
    #[arg(long, short = 'f')]
    pub format: Option<RecordFormat>,

    /// Export every game as one JSON object per line
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Save the batch summary as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: EvaluateArgs, config: &FileConfig) -> Result<()> {
    let engine = config.evaluate.engine(args.size, args.no_pruning)?;
    let search = engine.search;
    let format = args.format.unwrap_or(config.evaluate.format);

    let mut reader = DatasetReader::open(&args.dataset, engine.grid_size, format)?;
    if args.size.is_none() {
        // Without --size a dataset header decides the board size
        reader = reader.with_size_from_header();
    }
    let header = reader
        .read_header()
        .with_context(|| format!("failed to read dataset {}", args.dataset.display()))?;
    let size = reader.size();
    let records = reader
        .read_all()
        .with_context(|| format!("failed to read dataset {}", args.dataset.display()))?;

    print_section("Evaluation");
    print_kv("Dataset", &args.dataset.display().to_string());
    match header {
        Some(_) => print_kv("Board", &format!("{size} (from header)")),
        None => print_kv("Board", &size.to_string()),
    }
    print_kv("Format", format.as_str());
    print_kv("Pruning", if search.pruning { "alpha-beta" } else { "off" });
    print_kv("Records", &format_number(records.len()));

    let mut runner = BatchRunner::new(engine.batch());
    if config.common.progress && !args.no_progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.export {
        runner = runner.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let summary = runner.run(&records)?;

    print_section("Results");
    if summary.is_empty() {
        println!("No games processed; the dataset is empty.");
    }
    for line in report_lines(&summary) {
        println!("{line}");
    }

    println!();
    for (key, value) in stats_lines(&summary, search.pruning) {
        print_kv(key, &value);
    }

    if let Some(path) = &args.export {
        println!("\n✓ Games exported to: {}", path.display());
    }
    if let Some(path) = &args.summary {
        summary
            .save(path)
            .with_context(|| format!("failed to save summary to {}", path.display()))?;
        println!("✓ Summary saved to: {}", path.display());
    }

    Ok(())
}

/// The four aggregate report lines: X wins, O wins, draws, elapsed time
pub fn report_lines(summary: &BatchSummary) -> [String; 4] {
    [
        format!(
            "Games won by X: {}",
            format_share(summary.x_wins, summary.percent(summary.x_wins))
        ),
        format!(
            "Games won by O: {}",
            format_share(summary.o_wins, summary.percent(summary.o_wins))
        ),
        format!(
            "Drawn games: {}",
            format_share(summary.draws, summary.percent(summary.draws))
        ),
        format!("Elapsed time: {:.3}s", summary.elapsed.as_secs_f64()),
    ]
}

/// Work counters shown under the report, as key/value pairs
pub fn stats_lines(summary: &BatchSummary, pruning: bool) -> Vec<(&'static str, String)> {
    let mut lines = vec![
        ("Moves played", format_number(summary.total_moves)),
        ("Avg game length", format!("{:.2}", summary.avg_game_length())),
        ("Nodes searched", format_number(summary.search.nodes)),
    ];
    if pruning {
        lines.push(("Cutoffs", format_number(summary.search.cutoffs)));
    }
    lines
}
