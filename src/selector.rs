//! Random move selection.
//!
//! The computer opponent has no evaluation and no search: it lists every legal
//! `(from, to)` pair and picks one uniformly. Pairs that share a destination are
//! counted separately, so a destination closing two lines is twice as likely.

use log::debug;

use crate::board::{Board, Move, Player};

/// What the selector decided for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Play this move.
    Move(Move),
    /// No legal move this turn. The turn passes to the opponent.
    NoMoves,
    /// The game has already ended.
    GameOver,
}

/// Pick a move for `player` uniformly at random over all legal pairs.
pub fn select_move(player: Player, board: &Board, rng: &mut fastrand::Rng) -> Selection {
    if board.terminal_state().is_some() {
        return Selection::GameOver;
    }

    let moves = board.legal_moves(player);
    if moves.is_empty() {
        debug!("{player} has no legal move");
        return Selection::NoMoves;
    }

    let mv = moves[rng.usize(..moves.len())];
    debug!("{player} picks {} -> {} of {} moves", mv.from, mv.to, moves.len());
    Selection::Move(mv)
}

/// A random player that owns its random source.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: fastrand::Rng,
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSelector {
    /// Create a selector seeded from the global generator.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Create a selector with a fixed seed for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn select_move(&mut self, player: Player, board: &Board) -> Selection {
        select_move(player, board, &mut self.rng)
    }

    /// A random legal move to show a human player, if one exists.
    ///
    /// Unlike [`RandomSelector::select_move`] this ignores whether the game
    /// has ended.
    pub fn hint(&mut self, player: Player, board: &Board) -> Option<Move> {
        let moves = board.legal_moves(player);
        (!moves.is_empty()).then(|| moves[self.rng.usize(..moves.len())])
    }

    /// Access the random source, for drivers that share it with board setup.
    pub fn rng_mut(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }
}
