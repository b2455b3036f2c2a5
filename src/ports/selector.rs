//! Move selector port - abstraction over move-choosing strategies

use crate::tictactoe::{Board, Player, Position};

/// Chooses the next move for a side.
///
/// The board is passed mutably so that search-based selectors can explore
/// by placing and undoing marks on the caller's buffer instead of cloning
/// it. Implementations must hand the board back exactly as they received
/// it.
///
/// # Examples
///
/// ```
/// use ttt_eval::{
///     ports::MoveSelector,
///     tictactoe::{Board, Player, Position},
/// };
///
/// /// Always plays the first empty cell in row-major order
/// struct FirstEmpty;
///
/// impl MoveSelector for FirstEmpty {
///     fn name(&self) -> &str {
///         "first-empty"
///     }
///
///     fn select(&mut self, board: &mut Board, _side: Player) -> Option<Position> {
///         board.empty_positions().next()
///     }
/// }
/// ```
pub trait MoveSelector {
    /// Human-readable name of the strategy
    fn name(&self) -> &str;

    /// Pick a move for `side`, or `None` if the board has no empty cell.
    fn select(&mut self, board: &mut Board, side: Player) -> Option<Position>;
}

impl<S: MoveSelector + ?Sized> MoveSelector for &mut S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn select(&mut self, board: &mut Board, side: Player) -> Option<Position> {
        (**self).select(board, side)
    }
}
