//! Observer port - abstraction for batch observation and data collection
//!
//! This port defines the interface for observing batch events, allowing
//! composable data collection without coupling the batch runner to
//! specific output formats.

use crate::{
    Result,
    batch::BatchSummary,
    dataset::GameRecord,
    tictactoe::GameReport,
};

/// Observer trait for monitoring a batch run
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_batch_start(total_games)` - Once at the beginning
/// 2. For each record:
///    - `on_game_start(game_num, record)`
///    - `on_game_end(game_num, report)`
/// 3. `on_batch_end(summary)` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use ttt_eval::{ports::Observer, tictactoe::GameReport};
///
/// struct LengthObserver {
///     longest: usize,
/// }
///
/// impl Observer for LengthObserver {
///     fn on_game_end(&mut self, _game_num: usize, report: &GameReport) -> ttt_eval::Result<()> {
///         self.longest = self.longest.max(report.moves.len());
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game.
    ///
    /// # Parameters
    ///
    /// * `total_games` - Number of records in the batch
    fn on_batch_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called before a record is played out.
    fn on_game_start(&mut self, _game_num: usize, _record: &GameRecord) -> Result<()> {
        Ok(())
    }

    /// Called once a game has reached a terminal board.
    ///
    /// The batch counters have already been updated when this is called.
    fn on_game_end(&mut self, _game_num: usize, _report: &GameReport) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game. Use this to flush outputs.
    fn on_batch_end(&mut self, _summary: &BatchSummary) -> Result<()> {
        Ok(())
    }
}
