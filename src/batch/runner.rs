//! Batch runner: plays every record out and tallies outcomes

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::summary::BatchSummary;
use crate::{
    Result,
    dataset::GameRecord,
    ports::Observer,
    search::{MinimaxSelector, SearchConfig},
};

/// Batch configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub search: SearchConfig,
}

/// Runs a batch of records through the game driver, one game at a time
pub struct BatchRunner {
    config: BatchConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the runner
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> BatchConfig {
        self.config
    }

    /// Play every record out under perfect play.
    ///
    /// Each game is finished before the next one starts, and the counters
    /// are only touched once a game's outcome is known.
    #[instrument(skip_all, fields(games = records.len(), pruning = self.config.search.pruning))]
    pub fn run(&mut self, records: &[GameRecord]) -> Result<BatchSummary> {
        let start = Instant::now();
        info!("starting batch");

        for observer in &mut self.observers {
            observer.on_batch_start(records.len())?;
        }

        let mut selector = MinimaxSelector::new(self.config.search);
        let mut summary = BatchSummary::default();

        for (game_num, record) in records.iter().enumerate() {
            for observer in &mut self.observers {
                observer.on_game_start(game_num, record)?;
            }

            let report = record.play_out(&mut selector);
            let stats = selector.take_stats();
            debug!(
                game = game_num,
                record = %record,
                outcome = %report.outcome,
                moves = report.moves.len(),
                nodes = stats.nodes,
                "game finished"
            );
            summary.record(&report, stats);

            for observer in &mut self.observers {
                observer.on_game_end(game_num, &report)?;
            }
        }

        summary.elapsed = start.elapsed();
        info!(
            x_wins = summary.x_wins,
            o_wins = summary.o_wins,
            draws = summary.draws,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "batch finished"
        );

        for observer in &mut self.observers {
            observer.on_batch_end(&summary)?;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::tictactoe::{GameReport, GridSize};

    #[derive(Default)]
    struct Events {
        log: Vec<String>,
    }

    struct Recorder(Arc<Mutex<Events>>);

    impl Observer for Recorder {
        fn on_batch_start(&mut self, total_games: usize) -> Result<()> {
            self.0.lock().unwrap().log.push(format!("start {total_games}"));
            Ok(())
        }

        fn on_game_start(&mut self, game_num: usize, _record: &GameRecord) -> Result<()> {
            self.0.lock().unwrap().log.push(format!("game {game_num}"));
            Ok(())
        }

        fn on_game_end(&mut self, game_num: usize, report: &GameReport) -> Result<()> {
            self.0
                .lock()
                .unwrap()
                .log
                .push(format!("end {game_num} {}", report.outcome));
            Ok(())
        }

        fn on_batch_end(&mut self, summary: &BatchSummary) -> Result<()> {
            self.0
                .lock()
                .unwrap()
                .log
                .push(format!("done {}", summary.total_games));
            Ok(())
        }
    }

    fn records(lines: &[&str]) -> Vec<GameRecord> {
        lines
            .iter()
            .map(|line| GameRecord::parse_line(line, GridSize::CLASSIC).unwrap())
            .collect()
    }

    #[test]
    fn test_observer_event_order() {
        let events = Arc::new(Mutex::new(Events::default()));
        let mut runner = BatchRunner::new(BatchConfig::default())
            .with_observer(Box::new(Recorder(Arc::clone(&events))));

        let summary = runner
            .run(&records(&["OXXX      ", "XOO XX    "]))
            .unwrap();
        assert_eq!(summary.total_games, 2);

        let log = &events.lock().unwrap().log;
        assert_eq!(
            log,
            &vec![
                "start 2".to_string(),
                "game 0".to_string(),
                "end 0 X wins".to_string(),
                "game 1".to_string(),
                "end 1 X wins".to_string(),
                "done 2".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_batch() {
        let summary = BatchRunner::new(BatchConfig::default()).run(&[]).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.percent(summary.x_wins), 0.0);
    }
}
