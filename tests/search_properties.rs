//! Properties of the minimax engine and the best-move selector

mod common;

use common::{board, live_positions, record, two_ply_boards};
use ttt_eval::{
    GameOutcome, LineAnalyzer, Minimax, MinimaxSelector, Player, Position, SearchConfig,
    tictactoe::{Cell, X_WIN_SCORE},
};

const PRUNED: SearchConfig = SearchConfig { pruning: true };
const FULL: SearchConfig = SearchConfig { pruning: false };

mod pruning_equivalence {
    use super::*;

    #[test]
    fn test_scores_match_on_two_ply_positions() {
        for mut b in two_ply_boards() {
            for maximizing in [true, false] {
                let pruned = Minimax::new(PRUNED).minimax(&mut b, maximizing);
                let full = Minimax::new(FULL).minimax(&mut b, maximizing);
                assert_eq!(pruned, full, "score mismatch (maximizing: {maximizing}) on\n{b}");
            }
        }
    }

    #[test]
    fn test_best_moves_match_on_two_ply_positions() {
        let mut pruned = MinimaxSelector::new(PRUNED);
        let mut full = MinimaxSelector::new(FULL);

        for mut b in two_ply_boards() {
            for side in [Player::X, Player::O] {
                assert_eq!(
                    pruned.best_move(&mut b, side),
                    full.best_move(&mut b, side),
                    "move mismatch for {side} on\n{b}"
                );
            }
        }
    }

    #[test]
    fn test_every_reachable_position_both_sides() {
        let positions = live_positions();
        assert_eq!(positions.len(), 4520);

        let mut pruned_engine = Minimax::new(PRUNED);
        let mut full_engine = Minimax::new(FULL);
        let mut pruned = MinimaxSelector::new(PRUNED);
        let mut full = MinimaxSelector::new(FULL);

        for position in positions {
            let mut b = position.board;
            for side in [Player::X, Player::O] {
                let maximizing = side.is_maximizing();
                assert_eq!(
                    pruned_engine.minimax(&mut b, maximizing),
                    full_engine.minimax(&mut b, maximizing),
                    "score mismatch for {side} on\n{b}"
                );
                assert_eq!(
                    pruned.best_move(&mut b, side),
                    full.best_move(&mut b, side),
                    "move mismatch for {side} on\n{b}"
                );
            }
        }
    }

    #[test]
    fn test_pruning_never_visits_more_nodes() {
        let mut pruned = Minimax::new(PRUNED);
        let mut full = Minimax::new(FULL);

        for mut b in two_ply_boards() {
            pruned.minimax(&mut b, true);
            full.minimax(&mut b, true);
            let (p, f) = (pruned.take_stats(), full.take_stats());
            assert!(p.nodes <= f.nodes, "{} > {} on\n{b}", p.nodes, f.nodes);
            assert_eq!(f.cutoffs, 0);
        }
    }
}

mod best_move {
    use super::*;

    #[test]
    fn test_chosen_cell_is_empty() {
        let mut selector = MinimaxSelector::new(PRUNED);
        for mut b in two_ply_boards() {
            let before = b.clone();
            let chosen = selector.best_move(&mut b, Player::X).unwrap();
            assert_eq!(b, before, "search must leave the board unchanged");
            assert_eq!(b.get(chosen).unwrap(), Cell::Empty);
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut b = board("XOXXOOOXX");
        let mut selector = MinimaxSelector::new(PRUNED);
        assert_eq!(selector.best_move(&mut b, Player::X), None);
        assert_eq!(selector.best_move(&mut b, Player::O), None);
    }

    #[test]
    fn test_deterministic() {
        let mut b = board("X   O    ");
        let first = MinimaxSelector::new(PRUNED).best_move(&mut b, Player::X);
        for _ in 0..3 {
            assert_eq!(MinimaxSelector::new(PRUNED).best_move(&mut b, Player::X), first);
        }
    }

    #[test]
    fn test_completed_line_wins_over_empty_cells() {
        let b = board("XXX      ");
        assert_eq!(LineAnalyzer::evaluate(&b), X_WIN_SCORE);

        // The game is already over, so nothing is played
        let report = record("OXXX      ").play_out(&mut MinimaxSelector::new(PRUNED));
        assert!(report.moves.is_empty());
        assert_eq!(report.outcome, GameOutcome::Win(Player::X));
    }

    #[test]
    fn test_first_found_among_equal_scores() {
        // Every opening move draws, so the first empty cell is chosen
        let mut b = board("         ");
        assert_eq!(
            MinimaxSelector::new(PRUNED).best_move(&mut b, Player::X),
            Some(Position::new(0, 0))
        );
    }
}

mod self_play {
    use super::*;

    #[test]
    fn test_perfect_play_from_empty_board_is_a_draw() {
        for line in ["X         ", "O         "] {
            let report = record(line).play_out(&mut MinimaxSelector::new(PRUNED));
            assert_eq!(report.outcome, GameOutcome::Draw, "starting from {line:?}");
            assert_eq!(report.moves.len(), 9);
            assert!(!report.final_board.has_moves_left());
        }
    }

    #[test]
    fn test_moves_alternate_from_first_player() {
        let report = record("O         ").play_out(&mut MinimaxSelector::new(PRUNED));
        for (ply, mv) in report.moves.iter().enumerate() {
            let expected = if ply % 2 == 0 { Player::O } else { Player::X };
            assert_eq!(mv.player, expected);
        }
    }

    #[test]
    fn test_side_to_move_converts_a_forced_win() {
        // O completes a double threat and wins
        let report = record("OXX OO    ").play_out(&mut MinimaxSelector::new(PRUNED));
        assert_eq!(report.outcome, GameOutcome::Win(Player::O));
        assert_eq!(report.moves.len(), 3);
        assert_eq!(report.moves[0].position, Position::new(0, 2));
    }
}
