//! Batch observers: progress display and per-game export

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::summary::BatchSummary;
use crate::{
    Error, Result,
    ports::Observer,
    tictactoe::{GameOutcome, GameReport, Move, Player},
};

/// Progress bar observer - shows batch progress with running X/O/draw counts
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn counts(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_batch_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, report: &GameReport) -> Result<()> {
        match report.outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.counts());
        }
        Ok(())
    }

    fn on_batch_end(&mut self, _summary: &BatchSummary) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.counts());
        }
        Ok(())
    }
}

/// One exported game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObservation {
    pub game_num: usize,
    /// Input record in ascii form
    pub record: String,
    pub moves: Vec<Move>,
    /// Final board cells in row-major order (blank for empty)
    pub final_board: String,
    pub outcome: GameOutcome,
    /// Evaluator score of the final board
    pub score: i32,
}

impl GameObservation {
    pub fn from_report(game_num: usize, report: &GameReport) -> Self {
        let mut record = String::with_capacity(1 + report.initial.cells().len());
        record.push(report.first_player.to_char());
        record.push_str(&report.initial.encode());

        Self {
            game_num,
            record,
            moves: report.moves.clone(),
            final_board: report.final_board.encode(),
            outcome: report.outcome,
            score: report.outcome.score(),
        }
    }
}

/// JSONL observer - exports one JSON object per game
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create export {}", path.display()), e))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_game_end(&mut self, game_num: usize, report: &GameReport) -> Result<()> {
        let observation = GameObservation::from_report(game_num, report);
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_batch_end(&mut self, _summary: &BatchSummary) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::io("flush game export", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader};

    use tempfile::NamedTempFile;

    use super::*;
    use crate::{
        batch::{BatchConfig, BatchRunner},
        dataset::GameRecord,
        tictactoe::GridSize,
    };

    #[test]
    fn test_jsonl_observer_writes_one_line_per_game() {
        let file = NamedTempFile::new().unwrap();
        let records: Vec<_> = ["OXXX      ", "XXX OO    ", "O         "]
            .iter()
            .map(|line| GameRecord::parse_line(line, GridSize::CLASSIC).unwrap())
            .collect();

        let mut runner = BatchRunner::new(BatchConfig::default())
            .with_observer(Box::new(JsonlObserver::new(file.path()).unwrap()));
        runner.run(&records).unwrap();

        let lines: Vec<GameObservation> = BufReader::new(File::open(file.path()).unwrap())
            .lines()
            .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].record, "OXXX      ");
        assert!(lines[0].moves.is_empty());
        assert_eq!(lines[0].score, 10);
        assert_eq!(lines[1].outcome, GameOutcome::Win(Player::X));
        assert_eq!(lines[2].outcome, GameOutcome::Draw);
        assert_eq!(lines[2].moves.len(), 9);
    }

    #[test]
    fn test_progress_observer_tracks_counts() {
        let mut observer = ProgressObserver::new();
        let records: Vec<_> = ["OXXX      ", "XOO XX    "]
            .iter()
            .map(|line| GameRecord::parse_line(line, GridSize::CLASSIC).unwrap())
            .collect();
        let mut selector = crate::search::MinimaxSelector::default();
        for (i, record) in records.iter().enumerate() {
            observer
                .on_game_end(i, &record.play_out(&mut selector))
                .unwrap();
        }
        assert_eq!(observer.counts(), "X:2 O:0 D:0");
    }
}
