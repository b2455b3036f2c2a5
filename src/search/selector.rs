//! Best-move selection on top of the minimax engine

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::minimax::{Minimax, SearchConfig, SearchStats};
use crate::{
    ports::MoveSelector,
    tictactoe::{Board, Cell, Player, Position},
};

/// A candidate move and its minimax score (X's point of view)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub position: Position,
    pub score: i32,
}

impl ScoredMove {
    /// Strictly better than `other` for `side` (higher for X, lower for O)
    pub fn beats(&self, other: &ScoredMove, side: Player) -> bool {
        match side {
            Player::X => self.score > other.score,
            Player::O => self.score < other.score,
        }
    }
}

/// First strictly best candidate for `side`, in the given order. Applied
/// to [`MinimaxSelector::score_moves`] output it agrees with
/// [`MinimaxSelector::best_move`] without searching again.
pub fn first_best<'a>(
    moves: impl IntoIterator<Item = &'a ScoredMove>,
    side: Player,
) -> Option<ScoredMove> {
    moves.into_iter().fold(None, |best, candidate| match best {
        Some(current) if !candidate.beats(&current, side) => Some(current),
        _ => Some(*candidate),
    })
}

/// Picks the move with the best minimax score for the side to move.
///
/// Candidates are tried in row-major order and a later candidate only
/// replaces the current choice if its score is strictly better, so among
/// equally good moves the first one wins and repeated calls on the same
/// board return the same move.
#[derive(Debug, Clone, Default)]
pub struct MinimaxSelector {
    engine: Minimax,
}

impl MinimaxSelector {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            engine: Minimax::new(config),
        }
    }

    pub fn engine(&self) -> &Minimax {
        &self.engine
    }

    /// Return the search counters accumulated so far and reset them
    pub fn take_stats(&mut self) -> SearchStats {
        self.engine.take_stats()
    }

    /// Best move for `side`, or `None` when the board is full.
    pub fn best_move(&mut self, board: &mut Board, side: Player) -> Option<Position> {
        let mut best: Option<ScoredMove> = None;
        self.for_each_candidate(board, side, |candidate| {
            if best.is_none_or(|current| candidate.beats(&current, side)) {
                best = Some(candidate);
            }
        });

        if let Some(chosen) = best {
            debug!(
                side = %side,
                position = %chosen.position,
                score = chosen.score,
                nodes = self.engine.stats().nodes,
                cutoffs = self.engine.stats().cutoffs,
                "selected move"
            );
        }
        best.map(|chosen| chosen.position)
    }

    /// Score every empty cell for `side`, in row-major order
    pub fn score_moves(&mut self, board: &mut Board, side: Player) -> Vec<ScoredMove> {
        let mut scored = Vec::new();
        self.for_each_candidate(board, side, |candidate| scored.push(candidate));
        scored
    }

    fn for_each_candidate(
        &mut self,
        board: &mut Board,
        side: Player,
        mut visit: impl FnMut(ScoredMove),
    ) {
        let size = board.size();
        for index in 0..board.cells().len() {
            if board.cell(index) != Cell::Empty {
                continue;
            }

            board.set_cell(index, side.to_cell());
            // After `side` moves, the opponent is the one to move
            let score = self.engine.minimax(board, !side.is_maximizing());
            board.clear(index);

            visit(ScoredMove {
                position: Position::from_index(index, size),
                score,
            });
        }
    }
}

impl MoveSelector for MinimaxSelector {
    fn name(&self) -> &str {
        if self.engine.config().pruning {
            "minimax (alpha-beta)"
        } else {
            "minimax"
        }
    }

    fn select(&mut self, board: &mut Board, side: Player) -> Option<Position> {
        self.best_move(board, side)
    }
}
