//! Exhaustive minimax evaluation of NxN tic-tac-toe game records
//!
//! This crate provides:
//! - An NxN board with win and terminal detection
//! - A minimax search engine with optional alpha-beta pruning
//! - A game driver that plays a record out under perfect play
//! - Dataset reading, writing and generation (ascii and bitset encodings)
//! - A batch runner that aggregates outcome statistics
//!
//! # Examples
//!
//! ```
//! use ttt_eval::{GameOutcome, GameRecord, GridSize, MinimaxSelector, SearchConfig};
//!
//! let record = GameRecord::parse_line("XXX OO    ", GridSize::CLASSIC)?;
//! let mut selector = MinimaxSelector::new(SearchConfig::default());
//! let report = record.play_out(&mut selector);
//! assert_eq!(report.outcome, GameOutcome::Win(ttt_eval::Player::X));
//! # Ok::<(), ttt_eval::Error>(())
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ports;
pub mod search;
pub mod tictactoe;

pub use batch::{BatchConfig, BatchRunner, BatchSummary};
pub use config::EngineConfig;
pub use dataset::{DatasetReader, DatasetWriter, GameRecord, RecordFormat};
pub use error::{Error, Result};
pub use ports::{MoveSelector, Observer};
pub use search::{Minimax, MinimaxSelector, SearchConfig, SearchStats};
pub use tictactoe::{Board, Cell, GameOutcome, GameReport, GridSize, LineAnalyzer, Player, Position};
