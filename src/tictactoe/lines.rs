//! Winning line analysis for NxN boards
//!
//! A line is won when all N cells of a row, a column or one of the two main
//! diagonals hold the same mark. Boards that legal play cannot reach may
//! contain several complete lines; in that case the first line found in
//! scan order decides the result:
//!
//! 1. for each index `i` in `0..N`: row `i`, then column `i`
//! 2. the main diagonal (top-left to bottom-right)
//! 3. the anti diagonal (bottom-left to top-right)

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, Player};

/// Score of a board where X has completed a line
pub const X_WIN_SCORE: i32 = 10;
/// Score of a board where O has completed a line
pub const O_WIN_SCORE: i32 = -10;
/// Score of a board with no complete line
pub const DRAW_SCORE: i32 = 0;

/// A candidate winning line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    Row(usize),
    Column(usize),
    MainDiagonal,
    AntiDiagonal,
}

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Find the first complete line in scan order and its owner
    pub fn first_complete_line(board: &Board) -> Option<(Line, Player)> {
        let n = board.size().get();

        for i in 0..n {
            if let Some(player) = Self::line_owner(board, (0..n).map(|j| (i, j))) {
                return Some((Line::Row(i), player));
            }
            if let Some(player) = Self::line_owner(board, (0..n).map(|j| (j, i))) {
                return Some((Line::Column(i), player));
            }
        }

        if let Some(player) = Self::line_owner(board, (0..n).map(|i| (i, i))) {
            return Some((Line::MainDiagonal, player));
        }
        if let Some(player) = Self::line_owner(board, (0..n).map(|i| (n - 1 - i, i))) {
            return Some((Line::AntiDiagonal, player));
        }

        None
    }

    /// Score the board: +10 if X owns the first complete line, -10 if O
    /// does, otherwise 0 (either still in progress or a full-board draw).
    pub fn evaluate(board: &Board) -> i32 {
        match Self::first_complete_line(board) {
            Some((_, Player::X)) => X_WIN_SCORE,
            Some((_, Player::O)) => O_WIN_SCORE,
            None => DRAW_SCORE,
        }
    }

    pub fn winner(board: &Board) -> Option<Player> {
        Self::first_complete_line(board).map(|(_, player)| player)
    }

    /// Check if the game is over (a completed line or no empty cell left)
    pub fn is_terminal(board: &Board) -> bool {
        Self::evaluate(board) != DRAW_SCORE || !board.has_moves_left()
    }

    /// Owner of a line if every cell holds the same mark. Stops at the
    /// first mismatching cell.
    fn line_owner(board: &Board, mut cells: impl Iterator<Item = (usize, usize)>) -> Option<Player> {
        let (row, col) = cells.next()?;
        let first = board.at(row, col);
        if first == Cell::Empty {
            return None;
        }
        if cells.all(|(r, c)| board.at(r, c) == first) {
            first.to_player()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::GridSize;

    fn board(n: usize, cells: &str) -> Board {
        Board::from_string(GridSize::new(n).unwrap(), cells).unwrap()
    }

    #[test]
    fn test_row_win() {
        let b = board(3, "   OOOX X");
        assert_eq!(
            LineAnalyzer::first_complete_line(&b),
            Some((Line::Row(1), Player::O))
        );
        assert_eq!(LineAnalyzer::evaluate(&b), O_WIN_SCORE);
    }

    #[test]
    fn test_column_win() {
        let b = board(3, "O X OX  X");
        assert_eq!(
            LineAnalyzer::first_complete_line(&b),
            Some((Line::Column(2), Player::X))
        );
        assert_eq!(LineAnalyzer::evaluate(&b), X_WIN_SCORE);
    }

    #[test]
    fn test_diagonal_wins() {
        let main = board(3, "XO  XO  X");
        assert_eq!(
            LineAnalyzer::first_complete_line(&main),
            Some((Line::MainDiagonal, Player::X))
        );

        let anti = board(3, "X O O OX ");
        assert_eq!(
            LineAnalyzer::first_complete_line(&anti),
            Some((Line::AntiDiagonal, Player::O))
        );
    }

    #[test]
    fn test_six_by_six_lines() {
        let mut cells = " ".repeat(36);
        cells.replace_range(30..36, "XXXXXX");
        assert_eq!(LineAnalyzer::evaluate(&board(6, &cells)), X_WIN_SCORE);

        // Five in a row is not enough on a 6x6 board
        let mut cells = " ".repeat(36);
        cells.replace_range(30..35, "XXXXX");
        assert_eq!(LineAnalyzer::evaluate(&board(6, &cells)), DRAW_SCORE);
    }

    #[test]
    fn test_win_precedes_empty_cells() {
        let b = board(3, "XXX      ");
        assert!(b.has_moves_left());
        assert_eq!(LineAnalyzer::evaluate(&b), X_WIN_SCORE);
        assert!(LineAnalyzer::is_terminal(&b));
    }

    #[test]
    fn test_full_board_draw() {
        let b = board(3, "XOXXOOOXX");
        assert_eq!(LineAnalyzer::evaluate(&b), DRAW_SCORE);
        assert!(LineAnalyzer::is_terminal(&b));
        assert_eq!(LineAnalyzer::winner(&b), None);
    }

    #[test]
    fn test_in_progress_is_not_terminal() {
        let b = board(3, "XO       ");
        assert_eq!(LineAnalyzer::evaluate(&b), DRAW_SCORE);
        assert!(!LineAnalyzer::is_terminal(&b));
    }

    #[test]
    fn test_tie_break_first_line_in_scan_order() {
        // O owns column 0 and X owns column 2
        let b = board(3, "O XO XO X");
        assert_eq!(
            LineAnalyzer::first_complete_line(&b),
            Some((Line::Column(0), Player::O))
        );

        // Row 0 (X) is scanned before rows 1 and 2 (O)
        let b = board(3, "XXXOOOOOO");
        assert_eq!(LineAnalyzer::evaluate(&b), X_WIN_SCORE);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let b = board(3, "XOXOXO   ");
        let first = LineAnalyzer::evaluate(&b);
        assert_eq!(LineAnalyzer::evaluate(&b), first);
    }
}
