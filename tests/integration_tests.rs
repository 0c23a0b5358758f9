//! Integration tests for weiqi-rust
//!
//! Rule scenarios on small boards, whole-game invariants under AI self-play,
//! and the session and GTP front ends.

use weiqi_rust::board::{Board, BoardSnapshot, Move};
use weiqi_rust::config::GameConfig;
use weiqi_rust::coord::parse_vertex;
use weiqi_rust::error::{GoError, IllegalReason};
use weiqi_rust::grid::{Color, Point};
use weiqi_rust::gtp::GtpEngine;
use weiqi_rust::selector::{Difficulty, MoveSelector};
use weiqi_rust::session::SessionStore;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Play a sequence of moves, alternating colors from Black.
fn setup_position(size: usize, moves: &[Move]) -> Board {
    let mut board = Board::new(size).unwrap();
    for &mv in moves {
        board.play(mv).unwrap();
    }
    board
}

fn p(x: usize, y: usize) -> Move {
    Move::Play((x, y))
}

/// White takes a single black stone at (1, 1) with (2, 1), leaving a ko.
fn white_takes_ko() -> Board {
    setup_position(
        9,
        &[
            p(2, 0),
            p(1, 0),
            p(1, 1),
            p(0, 1),
            p(3, 1),
            p(1, 2),
            p(2, 2),
            p(2, 1),
        ],
    )
}

/// Self-play with two seeded selectors, checking invariants after each move.
fn self_play(size: usize, difficulty: Difficulty, seed: u64, moves: usize) -> Board {
    let mut board = Board::new(size).unwrap();
    let mut black = MoveSelector::with_seed(Color::Black, difficulty, seed);
    let mut white = MoveSelector::with_seed(Color::White, difficulty, seed + 1);
    let mut last_captures = (0, 0);

    for _ in 0..moves {
        if board.is_game_over() {
            break;
        }
        let selector = match board.current_player() {
            Color::Black => &mut black,
            Color::White => &mut white,
        };
        let decision = selector.get_move(&board);
        if let Move::Play(pt) = decision.mv {
            assert!(board.is_legal(pt), "AI chose illegal {pt:?}");
        }
        let opponent = board.current_player().opponent();
        let opponent_before = board.grid().count(Some(opponent));
        let captured = board.play(decision.mv).unwrap() as usize;
        assert_eq!(board.grid().count(Some(opponent)), opponent_before - captured);

        let g = board.grid();
        let cells = g.count(None) + g.count(Some(Color::Black)) + g.count(Some(Color::White));
        assert_eq!(cells, size * size);

        let captures = (board.captures(Color::Black), board.captures(Color::White));
        assert!(captures.0 >= last_captures.0 && captures.1 >= last_captures.1);
        last_captures = captures;
        assert_eq!(board.history().len(), board.move_count());
    }
    board
}

// =============================================================================
// Rule scenarios
// =============================================================================

#[test]
fn test_scenario_simple_alternation() {
    let mut board = Board::new(9).unwrap();
    let mut turns = vec![board.current_player()];
    for pt in [(2, 2), (2, 3), (3, 2)] {
        assert_eq!(board.place_stone(pt).unwrap(), 0);
        turns.push(board.current_player());
    }
    assert_eq!(
        turns,
        vec![Color::Black, Color::White, Color::Black, Color::White]
    );
    assert_eq!(board.captures(Color::Black), 0);
    assert_eq!(board.captures(Color::White), 0);
    assert_eq!(board.last_move(), Some((3, 2)));
}

#[test]
fn test_scenario_single_stone_capture() {
    let mut board = setup_position(
        9,
        &[p(0, 1), p(1, 1), p(2, 1), Move::Pass, p(1, 0), Move::Pass],
    );
    assert_eq!(board.grid().get((1, 1)), Some(Color::White));

    assert_eq!(board.place_stone((1, 2)).unwrap(), 1);
    assert_eq!(board.captures(Color::Black), 1);
    assert_eq!(board.grid().get((1, 1)), None);
    assert_eq!(board.history().last().unwrap().captured, 1);
}

#[test]
fn test_scenario_ko_recapture() {
    let mut board = white_takes_ko();
    assert_eq!(board.captures(Color::White), 1);
    assert_eq!(board.ko_point(), Some((1, 1)));
    assert!(!board.valid_moves().contains(&(1, 1)));

    let before = board.snapshot();
    assert_eq!(
        board.place_stone((1, 1)),
        Err(GoError::IllegalMove {
            point: (1, 1),
            reason: IllegalReason::Ko
        })
    );
    assert_eq!(board.snapshot(), before);

    // Ko threats elsewhere, then the retake is legal and sets up the mirror ko.
    board.place_stone((8, 8)).unwrap();
    board.place_stone((7, 7)).unwrap();
    assert_eq!(board.place_stone((1, 1)).unwrap(), 1);
    assert_eq!(board.ko_point(), Some((2, 1)));
    assert!(!board.is_legal((2, 1)));
}

#[test]
fn test_scenario_empty_board_score() {
    let board = Board::new(19).unwrap();
    let score = board.score();
    assert_eq!(score.black, 0.0);
    assert_eq!(score.white, 6.5);
    assert_eq!(score.winner(), Color::White);
}

#[test]
fn test_failed_moves_leave_board_unchanged() {
    let mut board = setup_position(9, &[p(4, 4)]);
    let before = board.snapshot();
    assert!(board.place_stone((4, 4)).is_err());
    assert!(board.place_stone((9, 4)).is_err());
    assert_eq!(board.snapshot(), before);
}

#[test]
fn test_two_passes_end_game() {
    let mut board = setup_position(9, &[p(4, 4), Move::Pass, Move::Pass]);
    assert!(board.is_game_over());
    assert_eq!(board.place_stone((0, 0)), Err(GoError::GameOver));
    assert_eq!(board.pass_move(), Err(GoError::GameOver));
}

// =============================================================================
// Whole-game invariants
// =============================================================================

#[test]
fn test_capture_shrinks_opponent_by_captured() {
    let mut board = setup_position(
        9,
        &[p(0, 1), p(1, 1), p(2, 1), Move::Pass, p(1, 0), Move::Pass],
    );
    let white_before = board.grid().count(Some(Color::White));
    let captured = board.place_stone((1, 2)).unwrap() as usize;
    assert_eq!(captured, 1);
    assert_eq!(board.grid().count(Some(Color::White)), white_before - captured);
}

#[test]
fn test_self_play_invariants_every_tier() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let board = self_play(9, difficulty, 21, 60);
        assert!(board.move_count() > 0);
    }
}

#[test]
fn test_valid_moves_exclude_occupied_and_ko() {
    let board = white_takes_ko();
    let moves = board.valid_moves();
    for pt in &moves {
        assert!(board.grid().is_empty_at(*pt));
        assert_ne!(Some(*pt), board.ko_point());
    }
    let empty = board.grid().count(None);
    // Empty but illegal for Black: the ko point and the (0, 0) eye.
    assert!(!board.is_legal((0, 0)));
    assert_eq!(moves.len(), empty - 2);
}

#[test]
fn test_seeded_games_are_reproducible() {
    let a = self_play(9, Difficulty::Hard, 99, 30);
    let b = self_play(9, Difficulty::Hard, 99, 30);
    assert_eq!(a.history(), b.history());
}

#[test]
fn test_ai_does_not_touch_board() {
    let board = white_takes_ko();
    let before = board.snapshot();
    let mut ai = MoveSelector::with_seed(Color::Black, Difficulty::Hard, 4);
    let decision = ai.get_move(&board);
    assert_ne!(decision.mv, Move::Play((1, 1)));
    assert!(!decision.rationale.is_empty());
    assert_eq!(board.snapshot(), before);
}

// =============================================================================
// Sessions, GTP and serialization
// =============================================================================

#[test]
fn test_session_game_flow() {
    let mut store = SessionStore::new();
    let id = store
        .create(&GameConfig {
            size: 9,
            difficulty: Difficulty::Medium,
            seed: Some(8),
            ..GameConfig::default()
        })
        .unwrap();

    let game = store.get_mut(id).unwrap();
    game.play((4, 4)).unwrap();
    let decision = game.ai_move().unwrap();
    assert!(matches!(decision.mv, Move::Play(_)));
    game.pass().unwrap();
    assert!(game.result().is_none());

    store.destroy(id).unwrap();
    assert_eq!(store.get(id).err(), Some(GoError::UnknownSession(id.0)));
}

#[test]
fn test_gtp_game() {
    let mut engine = GtpEngine::new(GameConfig {
        size: 9,
        seed: Some(2),
        ..GameConfig::default()
    })
    .unwrap();

    assert!(engine.execute("play", &["b", "E5"]).0);
    let (ok, vertex) = engine.execute("genmove", &["w"]);
    assert!(ok);
    let Some(Move::Play(pt)) = parse_vertex(&vertex, 9) else {
        panic!("expected a stone, got {vertex}");
    };
    assert_eq!(engine.board().grid().get(pt), Some(Color::White));

    assert!(engine.execute("play", &["b", "pass"]).0);
    assert_eq!(engine.execute("genmove", &["w"]).1, "pass");
    assert!(engine.board().is_game_over());
    let (ok, result) = engine.execute("final_score", &[]);
    assert!(ok);
    assert!(result.starts_with('B') || result.starts_with('W') || result == "0");
}

#[test]
fn test_snapshot_serializes() {
    let board = white_takes_ko();
    let snap = board.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let back: BoardSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
    assert_eq!(back.ko_point, Some((1, 1)));
    assert_eq!(back.rows[1][2], Some(Color::White));
}

#[test]
fn test_config_from_json() {
    let c: GameConfig =
        serde_json::from_str(r#"{"size": 13, "difficulty": "hard", "ai_color": "Black"}"#)
            .unwrap();
    assert_eq!(c.size, 13);
    assert_eq!(c.difficulty, Difficulty::Hard);
    assert_eq!(c.ai_color, Color::Black);
    assert_eq!(c.komi, 6.5);
    let board = c.board().unwrap();
    let star: Point = (3, 3);
    assert!(board.is_legal(star));
}
