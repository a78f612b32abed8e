//! Integration tests driving the engine the way a frontend would:
//! select a square, attempt a move, read the outcome.

use rand::prelude::*;
use rand::rngs::StdRng;

use casual_chess::board::Board;
use casual_chess::game::{Game, MoveOutcome, SelectionResult};
use casual_chess::types::{CastleSide, Color, GameStatus, PieceKind, Square};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn play(game: &mut Game, from: &str, to: &str) -> MoveOutcome {
    let from = sq(from);
    let to = sq(to);
    game.select_square(from.row, from.col);
    game.attempt_move(to.row, to.col)
}

fn assert_applied(game: &mut Game, from: &str, to: &str) {
    match play(game, from, to) {
        MoveOutcome::Applied(_) => {}
        other => panic!("{from} {to} should apply, got {other:?}"),
    }
}

/// Every playable (from, to) pair for the side to move.
fn candidates(board: &Board) -> Vec<(Square, Square)> {
    let mut moves = Vec::new();
    for row in 0..8u8 {
        for col in 0..8u8 {
            let from = Square { row, col };
            for destination in board.legal_destinations(from) {
                if !destination.unsafe_for_king {
                    moves.push((from, destination.square));
                }
            }
        }
    }
    moves
}

#[test]
fn white_has_exactly_twenty_opening_moves() {
    let game = Game::new();
    assert_eq!(candidates(game.board()).len(), 20);
}

#[test]
fn opening_moves_into_a_kingside_castle() {
    let mut game = Game::new();
    assert_applied(&mut game, "e2", "e4");
    assert_applied(&mut game, "e7", "e5");
    assert_applied(&mut game, "g1", "f3");
    assert_applied(&mut game, "b8", "c6");
    assert_applied(&mut game, "f1", "c4");
    assert_applied(&mut game, "g8", "f6");

    match play(&mut game, "e1", "g1") {
        MoveOutcome::Applied(applied) => {
            assert_eq!(applied.castled, Some(CastleSide::Kingside));
        }
        other => panic!("castle should apply, got {other:?}"),
    }
    assert_eq!(
        game.board().piece_at(sq("g1")).map(|p| p.kind),
        Some(PieceKind::King)
    );
    assert_eq!(
        game.board().piece_at(sq("f1")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert_eq!(game.board().piece_at(sq("h1")), None);
    assert!(game.board().king_moved(Color::White));
    assert!(game.board().rook_moved(Color::White, CastleSide::Kingside));
    assert_eq!(game.side_to_move(), Color::Black);
}

#[test]
fn moved_flags_never_reset_even_when_the_king_walks_home() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert_applied(&mut game, "e1", "g1"); // castle
    assert_applied(&mut game, "a8", "a7");
    assert_applied(&mut game, "g1", "f2");
    assert_applied(&mut game, "a7", "a6");
    assert_applied(&mut game, "f2", "e1"); // back on the home square
    assert_applied(&mut game, "a6", "a5");

    // queenside rook never moved and its path is clear, but the king's
    // moved flag is monotonic: no second castle, ever
    assert!(game.board().king_moved(Color::White));
    assert!(!game.board().rook_moved(Color::White, CastleSide::Queenside));
    assert_eq!(play(&mut game, "e1", "c1"), MoveOutcome::Rejected);
}

#[test]
fn selection_is_always_consumed_by_an_attempt() {
    let mut game = Game::new();
    assert!(matches!(
        game.select_square(6, 4),
        SelectionResult::Selected { .. }
    ));
    assert_eq!(game.attempt_move(3, 4), MoveOutcome::Rejected); // e2 to e5
    assert!(game.selection().is_none());
    // the refusal changed nothing on the board
    assert_eq!(*game.board(), Board::new());
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn promotion_appears_in_the_outcome_and_on_the_board() {
    let mut game = Game::from_fen("4k3/P7/8/8/8/8/6p1/4K3 w - - 0 1");
    match play(&mut game, "a7", "a8") {
        MoveOutcome::Applied(applied) => {
            assert!(applied.promoted);
            assert_eq!(applied.piece.kind, PieceKind::Queen);
        }
        other => panic!("expected promotion, got {other:?}"),
    }
    // black promotes on the other edge, capturing nothing
    match play(&mut game, "g2", "g1") {
        MoveOutcome::Applied(applied) => {
            assert!(applied.promoted);
            assert_eq!(applied.piece.color, Color::Black);
        }
        other => panic!("expected promotion, got {other:?}"),
    }
    assert_eq!(
        game.board().piece_at(sq("g1")).map(|p| p.kind),
        Some(PieceKind::Queen)
    );
}

#[test]
fn game_ends_the_moment_a_king_is_taken() {
    let mut game = Game::new();
    assert_applied(&mut game, "f2", "f3");
    assert_applied(&mut game, "e7", "e5");
    assert_applied(&mut game, "g2", "g4");
    match play(&mut game, "d8", "h4") {
        MoveOutcome::Applied(applied) => assert_eq!(applied.checked, Some(Color::White)),
        other => panic!("expected check, got {other:?}"),
    }
    // white ignores the check; the engine only reports it
    assert_applied(&mut game, "a2", "a3");
    match play(&mut game, "h4", "e1") {
        MoveOutcome::KingCaptured { winner } => assert_eq!(winner, Color::Black),
        other => panic!("expected the king to fall, got {other:?}"),
    }
    assert_eq!(
        game.status(),
        GameStatus::GameOver {
            winner: Color::Black
        }
    );
    assert_eq!(play(&mut game, "a3", "a4"), MoveOutcome::Rejected);

    game.reset();
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(candidates(game.board()).len(), 20);
}

#[test]
fn every_offered_move_is_accepted_in_random_play() {
    let mut game = Game::new();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        if game.status() != GameStatus::InProgress {
            break;
        }
        let moves = candidates(game.board());
        if moves.is_empty() {
            break;
        }
        let &(from, to) = moves.choose(&mut rng).unwrap();
        assert!(
            !matches!(game.select_square(from.row, from.col), SelectionResult::Ignored),
            "offered origin {} was not selectable",
            from.to_algebraic()
        );
        let outcome = game.attempt_move(to.row, to.col);
        assert!(
            !matches!(outcome, MoveOutcome::Rejected),
            "engine rejected a move it offered: {} {}",
            from.to_algebraic(),
            to.to_algebraic()
        );
    }
}
