//! Solve command - analyse a single record and play it out

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::FileConfig,
        output::{format_number, print_board, print_kv, print_section, print_subsection},
    },
    dataset::GameRecord,
    search::first_best,
    tictactoe::{GameOutcome, LineAnalyzer},
};

#[derive(Parser, Debug)]
#[command(about = "Score every move of a single record and play it out")]
pub struct SolveArgs {
    /// Record in ascii form: the side to move followed by the N*N cells,
    /// using '.' or a blank for empty cells (e.g. "OXX.OO...")
    pub record: String,

    /// Board side length (overrides the config file)
    #[arg(long, short = 's')]
    pub size: Option<usize>,

    /// Disable alpha-beta pruning
    #[arg(long)]
    pub no_pruning: bool,
}

pub fn execute(args: SolveArgs, config: &FileConfig) -> Result<()> {
    let engine = config.evaluate.engine(args.size, args.no_pruning)?;
    let record = GameRecord::parse_line(&args.record, engine.grid_size)
        .with_context(|| format!("invalid record {:?}", args.record))?;

    print_section("Position");
    print_board(&record.board);
    print_kv("To move", &record.first_player.to_string());
    print_kv("Evaluation", &LineAnalyzer::evaluate(&record.board).to_string());

    let mut selector = engine.selector();
    let mut board = record.board.clone();

    if LineAnalyzer::is_terminal(&board) {
        println!("\nThe position is already over: {}", GameOutcome::of_board(&board));
        return Ok(());
    }

    print_subsection("Candidate moves");
    let scored = selector.score_moves(&mut board, record.first_player);
    for candidate in &scored {
        print_kv(&candidate.position.to_string(), &candidate.score.to_string());
    }
    if let Some(best) = first_best(&scored, record.first_player) {
        print_kv("Best move", &best.position.to_string());
    }
    let analysis = selector.take_stats();

    let report = record.play_out(&mut selector);
    let playout = selector.take_stats();

    print_subsection("Perfect play");
    for (ply, mv) in report.moves.iter().enumerate() {
        println!("  {:>3}. {} plays {}", ply + 1, mv.player, mv.position);
    }
    println!();
    print_board(&report.final_board);
    print_kv("Outcome", &report.outcome.to_string());
    print_kv(
        "Nodes searched",
        &format_number(analysis.nodes + playout.nodes),
    );

    Ok(())
}
