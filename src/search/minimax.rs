//! Minimax search with optional alpha-beta pruning

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Board, Cell, DRAW_SCORE, LineAnalyzer};

/// Bound larger than any reachable score, used for the initial window
pub const INFINITY: i32 = 1000;

/// Search engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Skip siblings once `beta <= alpha`
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { pruning: true }
    }
}

/// Work counters collected while searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Boards visited, including terminal leaves
    pub nodes: u64,
    /// Times the remaining siblings of a node were skipped
    pub cutoffs: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
    }
}

/// Minimax search engine.
///
/// Scores are from X's point of view: +10 means X wins under perfect play,
/// -10 means O wins, 0 means a draw. The search always runs down to
/// terminal boards.
#[derive(Debug, Clone, Default)]
pub struct Minimax {
    config: SearchConfig,
    stats: SearchStats,
}

impl Minimax {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Return the counters accumulated so far and reset them
    pub fn take_stats(&mut self) -> SearchStats {
        std::mem::take(&mut self.stats)
    }

    /// Score `board` with `maximizing` telling whether X is to move.
    ///
    /// Runs with the full `(-INFINITY, INFINITY)` window, so the result is
    /// the same whether pruning is enabled or not.
    pub fn minimax(&mut self, board: &mut Board, maximizing: bool) -> i32 {
        self.minimax_window(board, maximizing, -INFINITY, INFINITY)
    }

    /// Windowed minimax.
    ///
    /// A completed line ends the search even if empty cells remain. Each
    /// empty cell is tried in row-major order by placing the side's mark,
    /// recursing and clearing the cell again, so `board` is unchanged when
    /// this returns.
    ///
    /// With pruning enabled and a narrower window than the full one, the
    /// value is only guaranteed to be exact when it lies strictly inside
    /// `(alpha, beta)`.
    pub fn minimax_window(
        &mut self,
        board: &mut Board,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        let score = LineAnalyzer::evaluate(board);
        if score != DRAW_SCORE {
            return score;
        }
        if !board.has_moves_left() {
            return DRAW_SCORE;
        }

        let mark = if maximizing { Cell::X } else { Cell::O };
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for index in 0..board.cells().len() {
            if board.cell(index) != Cell::Empty {
                continue;
            }

            board.set_cell(index, mark);
            let child = self.minimax_window(board, !maximizing, alpha, beta);
            board.clear(index);

            if maximizing {
                best = best.max(child);
                alpha = alpha.max(best);
            } else {
                best = best.min(child);
                beta = beta.min(best);
            }

            if self.config.pruning && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{GridSize, O_WIN_SCORE, X_WIN_SCORE};

    fn board(cells: &str) -> Board {
        Board::from_string(GridSize::CLASSIC, cells).unwrap()
    }

    fn both_scores(cells: &str, maximizing: bool) -> (i32, i32) {
        let mut b = board(cells);
        let pruned = Minimax::new(SearchConfig { pruning: true }).minimax(&mut b, maximizing);
        let full = Minimax::new(SearchConfig { pruning: false }).minimax(&mut b, maximizing);
        (pruned, full)
    }

    #[test]
    fn test_completed_line_returns_immediately() {
        let mut b = board("XXX      ");
        let mut engine = Minimax::default();
        assert_eq!(engine.minimax(&mut b, false), X_WIN_SCORE);
        assert_eq!(engine.stats().nodes, 1);
    }

    #[test]
    fn test_full_board_is_draw() {
        let mut b = board("XOXXOOOXX");
        assert_eq!(Minimax::default().minimax(&mut b, true), DRAW_SCORE);
    }

    #[test]
    fn test_empty_board_is_draw() {
        assert_eq!(both_scores("         ", true), (DRAW_SCORE, DRAW_SCORE));
    }

    #[test]
    fn test_immediate_win_for_side_to_move() {
        // X to move completes the top row
        assert_eq!(both_scores("XX OO    ", true), (X_WIN_SCORE, X_WIN_SCORE));
        // O to move completes the middle row
        assert_eq!(both_scores("XX OO X  ", false), (O_WIN_SCORE, O_WIN_SCORE));
    }

    #[test]
    fn test_forced_loss_against_fork() {
        // Opposite corners around O's center still draws, while an edge
        // reply to X's corner-center opening loses to a fork.
        assert_eq!(both_scores("X   O   X", false), (DRAW_SCORE, DRAW_SCORE));
        assert_eq!(both_scores("XO  X    ", false), (X_WIN_SCORE, X_WIN_SCORE));
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut b = board("X   O    ");
        let before = b.clone();
        Minimax::default().minimax(&mut b, true);
        assert_eq!(b, before);
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let mut pruned = Minimax::new(SearchConfig { pruning: true });
        let mut full = Minimax::new(SearchConfig { pruning: false });
        let mut b = board("X        ");
        pruned.minimax(&mut b, false);
        full.minimax(&mut b, false);

        assert!(pruned.stats().cutoffs > 0);
        assert_eq!(full.stats().cutoffs, 0);
        assert!(pruned.stats().nodes < full.stats().nodes);
    }

    #[test]
    fn test_take_stats_resets_counters() {
        let mut engine = Minimax::default();
        let mut b = board("XO XO    ");
        engine.minimax(&mut b, true);
        let stats = engine.take_stats();
        assert!(stats.nodes > 0);
        assert_eq!(engine.stats(), SearchStats::default());
    }
}
