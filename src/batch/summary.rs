//! Aggregated batch results

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    search::SearchStats,
    tictactoe::{GameOutcome, GameReport, Player},
};

/// Outcome counts and work done over a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    /// Moves played by the driver across all games
    pub total_moves: usize,
    pub search: SearchStats,
    /// Wall-clock time of the batch, in seconds when serialized
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Count a finished game. Called once per game, after its outcome is
    /// final.
    pub fn record(&mut self, report: &GameReport, stats: SearchStats) {
        self.total_games += 1;
        match report.outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.total_moves += report.moves.len();
        self.search += stats;
    }

    pub fn is_empty(&self) -> bool {
        self.total_games == 0
    }

    /// Fraction of games in `count`; 0.0 for an empty batch
    pub fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }

    /// Percentage of games in `count`; 0.0 for an empty batch
    pub fn percent(&self, count: usize) -> f64 {
        self.rate(count) * 100.0
    }

    pub fn x_win_rate(&self) -> f64 {
        self.rate(self.x_wins)
    }

    pub fn o_win_rate(&self) -> f64 {
        self.rate(self.o_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn avg_game_length(&self) -> f64 {
        self.rate(self.total_moves)
    }

    /// Save summary to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .map_err(|e| Error::io(format!("create summary {}", path.display()), e))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load summary from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| Error::io(format!("open summary {}", path.display()), e))?;
        Ok(serde_json::from_reader(file)?)
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
