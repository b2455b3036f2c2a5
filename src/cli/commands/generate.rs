//! Generate command - write a dataset of reachable positions

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::{FileConfig, resolve_size},
        output::{create_spinner, format_number, print_kv, print_section},
    },
    dataset::{DatasetGenerator, DatasetWriter, GeneratorConfig, RecordFormat},
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Generate a dataset of reachable non-terminal positions")]
pub struct GenerateArgs {
    /// Output dataset path
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Board side length (overrides the config file)
    #[arg(long, short = 's')]
    pub size: Option<usize>,

    /// Maximum number of positions visited
    #[arg(long, short = 'n')]
    pub samples: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Side to move on the empty board (`x` or `o`)
    #[arg(long)]
    pub first_player: Option<Player>,

    /// Dataset encoding: ascii or bitset
    #[arg(long, short = 'f')]
    pub format: Option<RecordFormat>,
}

pub fn execute(args: GenerateArgs, config: &FileConfig) -> Result<()> {
    let defaults = &config.generate;
    let generator_config = GeneratorConfig {
        size: resolve_size(args.size, defaults.size)?,
        samples: args.samples.unwrap_or(defaults.samples),
        first_player: args.first_player.unwrap_or(defaults.first_player),
        seed: args.seed.or(defaults.seed),
    };
    let format = args.format.unwrap_or(defaults.format);

    print_section("Dataset Generation");
    print_kv("Output", &args.output.display().to_string());
    print_kv("Board", &generator_config.size.to_string());
    print_kv("Samples", &format_number(generator_config.samples));
    print_kv("First player", &generator_config.first_player.to_string());
    print_kv("Format", format.as_str());
    if let Some(seed) = generator_config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let mut writer = DatasetWriter::create(&args.output, format)?;
    let generator = DatasetGenerator::new(generator_config);

    let spinner = if config.common.progress {
        Some(create_spinner("Walking game tree...")?)
    } else {
        None
    };
    let stats = generator.generate_with_progress(&mut writer, |written| {
        if let Some(spinner) = &spinner
            && written % 1000 == 0
        {
            spinner.set_message(format!("{} positions written", format_number(written)));
            spinner.tick();
        }
    })?;
    writer
        .finish()
        .with_context(|| format!("failed to flush {}", args.output.display()))?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    print_section("Results");
    print_kv("Records written", &format_number(stats.records_written));
    print_kv("Positions visited", &format_number(stats.children_visited));
    print_kv("Duplicates skipped", &format_number(stats.duplicates_skipped));
    print_kv("Terminal skipped", &format_number(stats.terminal_skipped));
    println!("\n✓ Dataset written to: {}", args.output.display());

    Ok(())
}
