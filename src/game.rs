//! Game session: turn order, passing, the computer opponent and restarts.
//!
//! A [`GameSession`] is the logic half of a front end's main loop. It keeps
//! the player on move and decides when a turn passes, while the front end
//! only supplies coordinates and reads the board back for display.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use thiserror::Error;

use crate::board::{
    Board, BoardConfig, BoardError, Coord, FullBoardTiebreak, Move, MoveError, MoveReport,
    Outcome, Player,
};
use crate::constants::*;
use crate::selector::{RandomSelector, Selection};

// =============================================================================
// Configuration
// =============================================================================

/// Board sizes offered to players.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BoardSize {
    /// 6x6
    Small,
    /// 8x8
    #[default]
    Medium,
    /// 10x10
    Large,
}

impl BoardSize {
    pub fn dimension(self) -> usize {
        match self {
            BoardSize::Small => SMALL_DIMENSION,
            BoardSize::Medium => MEDIUM_DIMENSION,
            BoardSize::Large => LARGE_DIMENSION,
        }
    }
}

impl FromStr for BoardSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s" | "small" | "6" => Ok(BoardSize::Small),
            "m" | "medium" | "8" => Ok(BoardSize::Medium),
            "l" | "large" | "10" => Ok(BoardSize::Large),
            _ => Err(ConfigError::UnknownSize(s.to_string())),
        }
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.dimension();
        write!(f, "{n}x{n}")
    }
}

/// Who controls each side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// One human as Black against the random player as White.
    #[default]
    Solo,
    /// Two humans sharing the board.
    Duel,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solo" | "1" | "1-player" => Ok(Mode::Solo),
            "duel" | "2" | "2-player" => Ok(Mode::Duel),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Solo => write!(f, "solo"),
            Mode::Duel => write!(f, "duel"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown board size {0:?} (expected S, M, L, 6, 8 or 10)")]
    UnknownSize(String),
    #[error("unknown mode {0:?} (expected solo or duel)")]
    UnknownMode(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub size: BoardSize,
    pub mode: Mode,
    pub bonus_cells: usize,
    pub tiebreak: FullBoardTiebreak,
    /// Seed for bonus placement and the computer's choices. `None` draws one
    /// from the global generator.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: BoardSize::default(),
            mode: Mode::default(),
            bonus_cells: DEFAULT_BONUS_CELLS,
            tiebreak: FullBoardTiebreak::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    fn board_config(&self) -> BoardConfig {
        BoardConfig {
            dimension: self.size.dimension(),
            bonus_cells: self.bonus_cells,
            tiebreak: self.tiebreak,
        }
    }
}

// =============================================================================
// Turns and Errors
// =============================================================================

/// What happened during one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Moved(MoveReport),
    /// The given player had no legal move.
    Passed(Player),
    Finished(Outcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("game is already over ({0})")]
    GameOver(Outcome),
    #[error("it is not the player's turn")]
    NotYourTurn,
    #[error("{0} has a legal move and cannot pass")]
    MustMove(Player),
    #[error(transparent)]
    Move(#[from] MoveError),
}

// =============================================================================
// Session
// =============================================================================

#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    current: Player,
    selector: RandomSelector,
    /// Number of turns taken, passes included.
    turns: usize,
}

impl GameSession {
    /// Start a new game. Black moves first.
    pub fn new(config: GameConfig) -> Result<Self, BoardError> {
        let mut selector = match config.seed {
            Some(seed) => RandomSelector::with_seed(seed),
            None => RandomSelector::new(),
        };
        let board = Board::new(&config.board_config(), selector.rng_mut())?;
        info!(
            "new {} {} game, seed {:?}",
            config.size, config.mode, config.seed
        );
        Ok(Self {
            config,
            board,
            current: Player::Black,
            selector,
            turns: 0,
        })
    }

    /// Replace the current game with a fresh one using `config`.
    pub fn new_game(&mut self, config: GameConfig) -> Result<(), BoardError> {
        *self = Self::new(config)?;
        Ok(())
    }

    /// Start over with the same configuration.
    ///
    /// The random source carries on, so an unseeded restart gets new bonus
    /// cells and a seeded one stays reproducible as a sequence.
    pub fn restart(&mut self) -> Result<(), BoardError> {
        self.board = Board::new(&self.config.board_config(), self.selector.rng_mut())?;
        self.current = Player::Black;
        self.turns = 0;
        info!("restarted {} {} game", self.config.size, self.config.mode);
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    /// The side the computer plays, if any.
    pub fn ai_player(&self) -> Option<Player> {
        match self.config.mode {
            Mode::Solo => Some(Player::White),
            Mode::Duel => None,
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        self.ai_player() == Some(self.current)
    }

    /// Check for the end of the game, storing the outcome on the board.
    pub fn status(&mut self) -> Option<Outcome> {
        self.board.check_terminal()
    }

    pub fn score(&self, player: Player) -> u32 {
        self.board.score(player)
    }

    /// A random legal move for the player on move.
    pub fn hint(&mut self) -> Option<Move> {
        self.selector.hint(self.current, &self.board)
    }

    fn end_turn(&mut self) {
        self.current = Board::toggle(self.current);
        self.turns += 1;
    }

    fn ensure_running(&mut self) -> Result<(), SessionError> {
        match self.status() {
            Some(outcome) => Err(SessionError::GameOver(outcome)),
            None => Ok(()),
        }
    }

    /// Play a human move for the player on move.
    ///
    /// # Errors
    /// - [`SessionError::GameOver`] once the game has ended
    /// - [`SessionError::NotYourTurn`] while the computer is on move
    /// - [`SessionError::Move`] for an illegal destination; nothing changes
    pub fn play(&mut self, to: Coord) -> Result<Turn, SessionError> {
        self.ensure_running()?;
        if self.is_ai_turn() {
            return Err(SessionError::NotYourTurn);
        }
        self.apply(to)
    }

    /// Let the random player choose and play for whoever is on move.
    ///
    /// Used for the computer's side in solo games, and by drivers that want
    /// a move generated regardless of mode.
    pub fn genmove(&mut self) -> Result<Turn, SessionError> {
        if let Some(outcome) = self.status() {
            return Ok(Turn::Finished(outcome));
        }
        match self.selector.select_move(self.current, &self.board) {
            Selection::Move(mv) => self.apply(mv.to),
            Selection::NoMoves => {
                let player = self.current;
                self.end_turn();
                debug!("{player} passes");
                Ok(Turn::Passed(player))
            }
            Selection::GameOver => unreachable!("terminal state is checked before selecting"),
        }
    }

    /// Play the computer's turn.
    ///
    /// # Errors
    /// [`SessionError::NotYourTurn`] when a human is on move.
    pub fn ai_turn(&mut self) -> Result<Turn, SessionError> {
        if !self.is_ai_turn() {
            return Err(SessionError::NotYourTurn);
        }
        self.genmove()
    }

    /// Pass the turn for a player without a legal move.
    pub fn pass(&mut self) -> Result<Turn, SessionError> {
        self.ensure_running()?;
        let player = self.current;
        if self.board.has_legal_move(player) {
            return Err(SessionError::MustMove(player));
        }
        self.end_turn();
        debug!("{player} passes");
        Ok(Turn::Passed(player))
    }

    /// Run the part of a turn that needs no human input.
    ///
    /// Reports the end of the game, passes for a human without moves, or
    /// plays the computer's move. Returns `None` when a human has to move.
    pub fn advance(&mut self) -> Option<Turn> {
        if let Some(outcome) = self.status() {
            return Some(Turn::Finished(outcome));
        }
        if self.is_ai_turn() {
            return self.genmove().ok();
        }
        if !self.board.has_legal_move(self.current) {
            return self.pass().ok();
        }
        None
    }

    fn apply(&mut self, to: Coord) -> Result<Turn, SessionError> {
        let report = self.board.apply_move(self.current, to)?;
        self.end_turn();
        if let Some(outcome) = self.status() {
            info!(
                "{outcome} after {} turns: black {} white {}",
                self.turns,
                self.board.score(Player::Black),
                self.board.score(Player::White)
            );
        }
        Ok(Turn::Moved(report))
    }
}
