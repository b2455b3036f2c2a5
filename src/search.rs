//! Exhaustive game-tree search
//!
//! [`Minimax`] scores a board under perfect play by both sides, optionally
//! with alpha-beta pruning. [`MinimaxSelector`] turns those scores into a
//! move choice for the game driver.

pub mod minimax;
pub mod selector;

pub use minimax::{INFINITY, Minimax, SearchConfig, SearchStats};
pub use selector::{MinimaxSelector, ScoredMove, first_best};
