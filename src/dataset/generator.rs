//! Dataset generation by randomized depth-first walk of the game tree

use std::{collections::HashSet, io::Write};

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{codec::DatasetWriter, record::GameRecord};
use crate::{
    Result,
    tictactoe::{Board, Cell, GridSize, LineAnalyzer, Player},
};

/// Settings for [`DatasetGenerator`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub size: GridSize,
    /// Upper bound on child positions visited (the root is written on top)
    pub samples: usize,
    /// Side to move on the empty root board
    pub first_player: Player,
    /// Seed for the move shuffling; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: GridSize::CLASSIC,
            samples: 100_000,
            first_player: Player::X,
            seed: None,
        }
    }
}

/// Counters reported after a generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub records_written: usize,
    pub children_visited: usize,
    pub duplicates_skipped: usize,
    pub terminal_skipped: usize,
}

/// One level of the walk: the shuffled empty cells of a position and the
/// move that led into it
struct Frame {
    moves: Vec<usize>,
    next: usize,
    entered_by: Option<usize>,
}

/// Writes non-terminal positions reachable from the empty board, after a
/// size header.
///
/// Children are visited in a seeded random order. Terminal children are
/// skipped, each distinct position (board plus side to move) is written
/// once, and the walk stops once `samples` children have been visited.
pub struct DatasetGenerator {
    config: GeneratorConfig,
}

impl DatasetGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[instrument(skip_all, fields(size = %self.config.size, samples = self.config.samples))]
    pub fn generate<W: Write>(&self, writer: &mut DatasetWriter<W>) -> Result<GenerationStats> {
        self.generate_with_progress(writer, |_| {})
    }

    /// Same as [`generate`](Self::generate), calling `progress` with the
    /// number of records written after each write.
    pub fn generate_with_progress<W: Write>(
        &self,
        writer: &mut DatasetWriter<W>,
        mut progress: impl FnMut(usize),
    ) -> Result<GenerationStats> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut stats = GenerationStats::default();
        let mut seen = HashSet::new();

        let mut board = Board::new(self.config.size);
        let mut to_move = self.config.first_player;

        writer.write_header(self.config.size)?;
        writer.write(&GameRecord::new(to_move, board.clone()))?;
        stats.records_written += 1;
        progress(stats.records_written);

        let mut stack = vec![Frame {
            moves: shuffled_empty_cells(&board, &mut rng),
            next: 0,
            entered_by: None,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&index) = frame.moves.get(frame.next) else {
                if let Some(index) = frame.entered_by {
                    board.clear(index);
                    to_move = to_move.opponent();
                }
                stack.pop();
                continue;
            };
            frame.next += 1;

            if stats.children_visited >= self.config.samples {
                break;
            }

            board.set_cell(index, to_move.to_cell());
            if LineAnalyzer::is_terminal(&board) {
                board.clear(index);
                stats.terminal_skipped += 1;
                continue;
            }
            stats.children_visited += 1;

            let record = GameRecord::new(to_move.opponent(), board.clone());
            if !seen.insert(record.to_line()) {
                board.clear(index);
                stats.duplicates_skipped += 1;
                continue;
            }

            writer.write(&record)?;
            stats.records_written += 1;
            progress(stats.records_written);

            to_move = to_move.opponent();
            stack.push(Frame {
                moves: shuffled_empty_cells(&board, &mut rng),
                next: 0,
                entered_by: Some(index),
            });
        }

        debug!(?stats, "walk finished");
        info!(records = stats.records_written, "dataset generated");
        Ok(stats)
    }
}

fn shuffled_empty_cells(board: &Board, rng: &mut StdRng) -> Vec<usize> {
    let mut moves: Vec<usize> = board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Cell::Empty)
        .map(|(index, _)| index)
        .collect();
    moves.shuffle(rng);
    moves
}
