//! NxN tic-tac-toe: board, win detection and the game driver

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Board, Cell, GridSize, Player, Position};
pub use game::{GameDriver, GameOutcome, GameReport, GameState, Move, play_out};
pub use lines::{DRAW_SCORE, Line, LineAnalyzer, O_WIN_SCORE, X_WIN_SCORE};
