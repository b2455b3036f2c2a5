//! Game driver: plays a position out under a move selector

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    board::{Board, Player, Position},
    lines::{DRAW_SCORE, LineAnalyzer, O_WIN_SCORE, X_WIN_SCORE},
};
use crate::ports::MoveSelector;

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub player: Player,
}

/// Outcome of a game, read off the terminal board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Map an evaluator score to an outcome
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= X_WIN_SCORE => GameOutcome::Win(Player::X),
            s if s <= O_WIN_SCORE => GameOutcome::Win(Player::O),
            _ => GameOutcome::Draw,
        }
    }

    pub fn of_board(board: &Board) -> Self {
        Self::from_score(LineAnalyzer::evaluate(board))
    }

    pub fn score(self) -> i32 {
        match self {
            GameOutcome::Win(Player::X) => X_WIN_SCORE,
            GameOutcome::Win(Player::O) => O_WIN_SCORE,
            GameOutcome::Draw => DRAW_SCORE,
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Win(player) => write!(f, "{player} wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Terminal,
}

/// Everything known about a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub initial: Board,
    pub first_player: Player,
    pub moves: Vec<Move>,
    pub final_board: Board,
    pub outcome: GameOutcome,
}

/// Repeatedly asks a selector for the side to move and applies its answer
/// until a line is completed or the board is full.
#[derive(Debug, Clone)]
pub struct GameDriver {
    initial: Board,
    first_player: Player,
    board: Board,
    to_move: Player,
    moves: Vec<Move>,
    state: GameState,
}

impl GameDriver {
    pub fn new(board: Board, first_player: Player) -> Self {
        let state = if LineAnalyzer::is_terminal(&board) {
            GameState::Terminal
        } else {
            GameState::InProgress
        };
        Self {
            initial: board.clone(),
            first_player,
            board,
            to_move: first_player,
            moves: Vec::new(),
            state,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Play one move. Returns the new state.
    ///
    /// A selector that answers `None` or names an occupied cell while
    /// moves remain ends the game where it stands.
    pub fn step<S: MoveSelector>(&mut self, selector: &mut S) -> GameState {
        if self.state == GameState::Terminal {
            return self.state;
        }

        let side = self.to_move;
        let Some(position) = selector.select(&mut self.board, side) else {
            warn!(
                selector = selector.name(),
                side = %side,
                board = %self.board.encode(),
                "selector returned no move on a board with empty cells"
            );
            self.state = GameState::Terminal;
            return self.state;
        };

        if let Err(err) = self.board.place(position, side) {
            warn!(
                selector = selector.name(),
                side = %side,
                %position,
                error = %err,
                "selector returned an unplayable move"
            );
            self.state = GameState::Terminal;
            return self.state;
        }

        debug!(side = %side, %position, ply = self.moves.len() + 1, "applied move");
        self.moves.push(Move {
            position,
            player: side,
        });
        self.to_move = side.opponent();

        if LineAnalyzer::is_terminal(&self.board) {
            self.state = GameState::Terminal;
        }
        self.state
    }

    /// Play until the game is over and return the report
    pub fn run<S: MoveSelector>(mut self, selector: &mut S) -> GameReport {
        while self.step(selector) == GameState::InProgress {}
        self.into_report()
    }

    pub fn into_report(self) -> GameReport {
        let outcome = GameOutcome::of_board(&self.board);
        GameReport {
            initial: self.initial,
            first_player: self.first_player,
            moves: self.moves,
            final_board: self.board,
            outcome,
        }
    }
}

/// Play `board` out from `first_player` with `selector` choosing every move
pub fn play_out<S: MoveSelector>(board: Board, first_player: Player, selector: &mut S) -> GameReport {
    GameDriver::new(board, first_player).run(selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{search::MinimaxSelector, tictactoe::GridSize};

    fn board(cells: &str) -> Board {
        Board::from_string(GridSize::CLASSIC, cells).unwrap()
    }

    /// Selector that always gives up
    struct Silent;

    impl MoveSelector for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        fn select(&mut self, _board: &mut Board, _side: Player) -> Option<Position> {
            None
        }
    }

    /// Selector that insists on an occupied cell
    struct Stubborn;

    impl MoveSelector for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn select(&mut self, _board: &mut Board, _side: Player) -> Option<Position> {
            Some(Position::new(0, 0))
        }
    }

    #[test]
    fn test_outcome_from_score() {
        assert_eq!(GameOutcome::from_score(10), GameOutcome::Win(Player::X));
        assert_eq!(GameOutcome::from_score(-10), GameOutcome::Win(Player::O));
        assert_eq!(GameOutcome::from_score(0), GameOutcome::Draw);
        assert_eq!(GameOutcome::Win(Player::O).score(), -10);
    }

    #[test]
    fn test_terminal_board_plays_no_moves() {
        let report = play_out(board("XXX      "), Player::O, &mut MinimaxSelector::default());
        assert!(report.moves.is_empty());
        assert_eq!(report.outcome, GameOutcome::Win(Player::X));
    }

    #[test]
    fn test_side_to_move_converts_win() {
        let report = play_out(board("XX OO X  "), Player::O, &mut MinimaxSelector::default());
        assert_eq!(report.moves.len(), 1);
        assert_eq!(report.moves[0].position, Position::new(1, 2));
        assert_eq!(report.outcome, GameOutcome::Win(Player::O));
    }

    #[test]
    fn test_sides_alternate() {
        let report = play_out(board("X        "), Player::O, &mut MinimaxSelector::default());
        assert_eq!(report.first_player, Player::O);
        for (i, mv) in report.moves.iter().enumerate() {
            let expected = if i % 2 == 0 { Player::O } else { Player::X };
            assert_eq!(mv.player, expected);
        }
        assert_eq!(
            report.final_board.occupied_count(),
            1 + report.moves.len()
        );
    }

    #[test]
    fn test_missing_move_ends_game() {
        let mut driver = GameDriver::new(board("X        "), Player::O);
        assert_eq!(driver.step(&mut Silent), GameState::Terminal);
        let report = driver.into_report();
        assert!(report.moves.is_empty());
        assert_eq!(report.outcome, GameOutcome::Draw);
    }

    #[test]
    fn test_occupied_move_ends_game() {
        let mut driver = GameDriver::new(board("X        "), Player::O);
        assert_eq!(driver.step(&mut Stubborn), GameState::Terminal);
        assert_eq!(driver.board(), &board("X        "));
    }
}
