//! Integration tests for othello-rs
//!
//! Scenario tests pin down the opening, single captures and each way a game
//! can end. The invariant tests play whole seeded random games and check the
//! board bookkeeping after every move.

use std::collections::BTreeSet;

use othello_rs::board::{Board, Coord, FullBoardTiebreak, MoveError, Outcome, Player};
use othello_rs::constants::{BONUS_POINTS, DIRECTIONS};
use othello_rs::game::{BoardSize, GameConfig, GameSession, Mode, Turn};
use othello_rs::selector::{RandomSelector, Selection, select_move};

// =============================================================================
// Helper functions
// =============================================================================

fn coords(list: &[(usize, usize)]) -> BTreeSet<Coord> {
    list.iter().map(|&c| Coord::from(c)).collect()
}

/// Check that the owned-cell index agrees with the grid and is disjoint.
fn assert_consistent(board: &Board) {
    let black = board.owned_cells(Player::Black);
    let white = board.owned_cells(Player::White);
    assert!(black.is_disjoint(white), "owned sets overlap");

    for at in board.coords() {
        match board.owner(at) {
            Some(Player::Black) => assert!(black.contains(&at) && !white.contains(&at)),
            Some(Player::White) => assert!(white.contains(&at) && !black.contains(&at)),
            None => assert!(!black.contains(&at) && !white.contains(&at)),
        }
    }
    assert_eq!(
        black.len() + white.len() + board.empty_count(),
        board.dimension() * board.dimension()
    );
}

/// Play random moves on a board until the game ends, checking invariants
/// after every turn. Returns the outcome and the number of moves played.
fn play_out(mut board: Board, seed: u64) -> (Outcome, usize) {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut player = Player::Black;
    let mut moves = 0;

    loop {
        assert_consistent(&board);
        match select_move(player, &board, &mut rng) {
            Selection::GameOver => {
                let outcome = board.check_terminal().expect("terminal state");
                assert_eq!(board.check_terminal(), Some(outcome));
                return (outcome, moves);
            }
            Selection::NoMoves => {}
            Selection::Move(mv) => {
                let before = board.clone();
                let pieces_before =
                    before.piece_count(Player::Black) + before.piece_count(Player::White);

                let report = board.apply_move(player, mv.to).unwrap();
                moves += 1;

                let pieces_after =
                    board.piece_count(Player::Black) + board.piece_count(Player::White);
                assert_eq!(pieces_after, pieces_before + 1, "one new piece per move");
                assert_eq!(
                    board.piece_count(player),
                    before.piece_count(player) + report.flipped.len() + 1
                );

                // Only the destination and the captured cells change owner.
                let changed: BTreeSet<Coord> = board
                    .coords()
                    .filter(|&at| board.owner(at) != before.owner(at))
                    .collect();
                let mut expected: BTreeSet<Coord> = report.flipped.iter().copied().collect();
                expected.insert(mv.to);
                assert_eq!(changed, expected);

                let bonus_cells = expected.iter().filter(|&&at| board.has_bonus(at)).count();
                assert_eq!(report.bonus_gained, bonus_cells as u32 * BONUS_POINTS);
                assert_eq!(
                    board.bonus_total(player),
                    before.bonus_total(player) + report.bonus_gained
                );
            }
        }
        player = Board::toggle(player);
    }
}

// =============================================================================
// Opening and move generation
// =============================================================================

#[test]
fn test_standard_opening_destinations() {
    let board = Board::with_bonus_cells(8, &[]).unwrap();

    let white: BTreeSet<Coord> = board
        .legal_moves(Player::White)
        .into_iter()
        .map(|mv| mv.to)
        .collect();
    assert_eq!(white, coords(&[(2, 4), (3, 5), (4, 2), (5, 3)]));

    let black = board.legal_targets(Player::Black);
    assert_eq!(black, coords(&[(2, 3), (3, 2), (4, 5), (5, 4)]));
}

#[test]
fn test_every_legal_move_has_a_capture() {
    let board = Board::with_seed(10, 9).unwrap();
    for player in Player::ALL {
        let targets = board.legal_targets(player);
        for at in board.coords() {
            let captures = !board.captures(player, at).is_empty();
            assert_eq!(captures, targets.contains(&at), "{player} at {at}");
        }
    }
}

#[test]
fn test_destinations_follow_straight_lines() {
    let board = Board::with_seed(8, 3).unwrap();
    for mv in board.legal_moves(Player::Black) {
        let dcol = mv.to.col as isize - mv.from.col as isize;
        let drow = mv.to.row as isize - mv.from.row as isize;
        let steps = dcol.abs().max(drow.abs());
        assert!(steps >= 2, "at least one piece lies between {mv:?}");
        let dir = (dcol / steps, drow / steps);
        assert!(DIRECTIONS.contains(&dir));
        assert!(dcol == 0 || drow == 0 || dcol.abs() == drow.abs());
    }
}

// =============================================================================
// Captures and scoring
// =============================================================================

#[test]
fn test_single_capture_scores() {
    let mut board = Board::with_bonus_cells(8, &[]).unwrap();
    let black_before = board.score(Player::Black);
    let white_before = board.score(Player::White);

    let report = board.apply_move(Player::Black, Coord::new(3, 2)).unwrap();

    assert_eq!(report.flipped, vec![Coord::new(3, 3)]);
    assert_eq!(board.score(Player::Black), black_before + 2);
    assert_eq!(board.score(Player::White), white_before - 1);
}

#[test]
fn test_capturing_bonus_cell_scores_extra() {
    let mut board = Board::with_bonus_cells(8, &[Coord::new(3, 3)]).unwrap();
    board.apply_move(Player::Black, Coord::new(2, 3)).unwrap();

    assert_eq!(board.bonus_total(Player::Black), BONUS_POINTS);
    assert_eq!(board.score(Player::Black), 4 + BONUS_POINTS);
}

#[test]
fn test_landing_on_bonus_cell_scores_extra() {
    let mut board = Board::with_bonus_cells(8, &[Coord::new(5, 4)]).unwrap();
    let report = board.apply_move(Player::Black, Coord::new(5, 4)).unwrap();

    assert_eq!(report.bonus_gained, BONUS_POINTS);
    assert_eq!(board.score(Player::Black), 4 + BONUS_POINTS);
    assert_eq!(board.bonus_total(Player::White), 0);
}

#[test]
fn test_rejected_move_changes_nothing() {
    let mut board = Board::with_seed(8, 21).unwrap();
    board.apply_move(Player::Black, Coord::new(2, 3)).unwrap();
    let snapshot = board.clone();

    for to in [Coord::new(2, 3), Coord::new(7, 7), Coord::new(2, 2), Coord::new(8, 0)] {
        assert_eq!(
            board.apply_move(Player::Black, to),
            Err(MoveError::InvalidMove {
                player: Player::Black,
                to
            })
        );
    }
    assert_eq!(board, snapshot);
}

// =============================================================================
// Game end
// =============================================================================

#[test]
fn test_player_without_pieces_loses() {
    let mut board = Board::from_rows(&[
        "......", //
        "..WW..", //
        "..WW..", //
        "......", //
        "......", //
        "......", //
    ])
    .unwrap();
    assert_eq!(board.check_terminal(), Some(Outcome::WhiteWins));
}

#[test]
fn test_full_board_with_equal_counts_is_a_tie() {
    let mut board = Board::from_rows(&[
        "BWBWBW", //
        "WBWBWB", //
        "BWBWBW", //
        "WBWBWB", //
        "BWBWBW", //
        "WBWBWB", //
    ])
    .unwrap();
    assert_eq!(board.check_terminal(), Some(Outcome::Tie));
}

#[test]
fn test_full_board_by_piece_count() {
    let mut board = Board::from_rows(&["BBBB", "BBBB", "BBWW", "WWWW"]).unwrap();
    assert_eq!(board.check_terminal(), Some(Outcome::BlackWins));

    let mut board = Board::from_rows(&["BBBB", "BBBB", "BBWW", "WWWW"])
        .unwrap()
        .with_tiebreak(FullBoardTiebreak::Score);
    assert_eq!(board.check_terminal(), Some(Outcome::BlackWins));
}

#[test]
fn test_check_terminal_is_idempotent() {
    let mut board = Board::with_seed(8, 1).unwrap();
    assert_eq!(board.check_terminal(), None);
    assert_eq!(board.check_terminal(), None);

    let mut stuck = Board::from_rows(&["B..W", "....", "....", "...."]).unwrap();
    assert_eq!(stuck.check_terminal(), Some(Outcome::Tie));
    assert_eq!(stuck.check_terminal(), Some(Outcome::Tie));
}

#[test]
fn test_no_moves_passes_turn() {
    let board = Board::from_rows(&[
        ".BWW", //
        "WWWW", //
        "WWWW", //
        "WWWW", //
    ])
    .unwrap();
    assert_eq!(board.terminal_state(), None);

    let mut selector = RandomSelector::with_seed(12);
    let mut player = Player::Black;
    assert_eq!(selector.select_move(player, &board), Selection::NoMoves);

    player = Board::toggle(player);
    assert!(matches!(
        selector.select_move(player, &board),
        Selection::Move(mv) if mv.to == Coord::new(0, 0)
    ));
}

// =============================================================================
// Whole games
// =============================================================================

#[test]
fn test_random_games_keep_invariants() {
    for (dimension, seed) in [(6, 1), (8, 2), (8, 3), (10, 4), (4, 5)] {
        let board = Board::with_seed(dimension, seed).unwrap();
        let (_, moves) = play_out(board, seed * 31);
        assert!(moves <= dimension * dimension - 4);
    }
}

#[test]
fn test_seeded_games_are_reproducible() {
    let a = play_out(Board::with_seed(8, 77).unwrap(), 5);
    let b = play_out(Board::with_seed(8, 77).unwrap(), 5);
    assert_eq!(a, b);
}

#[test]
fn test_solo_session_against_random_player() {
    let mut session = GameSession::new(GameConfig {
        size: BoardSize::Small,
        mode: Mode::Solo,
        seed: Some(2024),
        ..GameConfig::default()
    })
    .unwrap();
    let mut hints = RandomSelector::with_seed(1);

    let outcome = loop {
        if let Some(turn) = session.advance() {
            if let Turn::Finished(outcome) = turn {
                break outcome;
            }
            continue;
        }
        // The human side plays whatever the hint suggests.
        let player = session.current_player();
        let mv = hints
            .hint(player, session.board())
            .expect("advance only stops when a move exists");
        session.play(mv.to).unwrap();
    };

    assert_eq!(session.board().result(), Some(outcome));
    assert_consistent(session.board());
}
