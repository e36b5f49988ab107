//! Othello board representation, move generation and capture resolution.
//!
//! The board is a square grid of [`Cell`]s addressed by [`Coord`]. Alongside
//! the grid it keeps an index of the cells each player owns, the bonus score
//! each player has collected, and the terminal result once one is detected.
//!
//! Moves are keyed by destination only: [`Board::apply_move`] converts every
//! line of opponent pieces that the destination closes, no matter which of
//! the mover's pieces bounds it.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use log::{debug, trace};
use thiserror::Error;

use crate::constants::*;

// =============================================================================
// Players and Cells
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    /// Player A, moves first.
    Black,
    /// Player B.
    White,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Black, Player::White];

    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

/// Who controls a cell: nobody, Black or White.
pub type Owner = Option<Player>;

/// A grid coordinate. Columns run left to right, rows top to bottom.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((col, row): (usize, usize)) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub owner: Owner,
    /// Bonus marker, fixed when the board is created.
    pub has_bonus: bool,
}

/// A legal move: a piece at `from` closes a line of opponent pieces ending at
/// the empty cell `to`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

// =============================================================================
// Outcomes and Configuration
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    BlackWins,
    WhiteWins,
    Tie,
}

impl Outcome {
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::Black => Outcome::BlackWins,
            Player::White => Outcome::WhiteWins,
        }
    }

    /// The winning player, or `None` for a tie.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::BlackWins => Some(Player::Black),
            Outcome::WhiteWins => Some(Player::White),
            Outcome::Tie => None,
        }
    }

    fn from_comparison(black: u32, white: u32) -> Self {
        match black.cmp(&white) {
            Ordering::Greater => Outcome::BlackWins,
            Ordering::Less => Outcome::WhiteWins,
            Ordering::Equal => Outcome::Tie,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::BlackWins => write!(f, "black wins"),
            Outcome::WhiteWins => write!(f, "white wins"),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

/// What decides a game that ends with every cell occupied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FullBoardTiebreak {
    /// Compare owned-cell counts, ignoring bonus points.
    #[default]
    PieceCount,
    /// Compare full scores, bonus points included.
    Score,
}

/// Parameters for a freshly generated board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub dimension: usize,
    /// Number of random bonus markers to drop.
    pub bonus_cells: usize,
    pub tiebreak: FullBoardTiebreak,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            bonus_cells: DEFAULT_BONUS_CELLS,
            tiebreak: FullBoardTiebreak::default(),
        }
    }
}

// =============================================================================
// Errors and Move Results
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimension must be even and between 4 and 26 (got {0})")]
    InvalidDimension(usize),
    #[error("coordinate {0} is outside the board")]
    OutOfBounds(Coord),
    #[error("row {row} has an unknown cell character {found:?}")]
    BadCell { row: usize, found: char },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        found: usize,
        expected: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: {to} is not a legal destination for {player}")]
    InvalidMove { player: Player, to: Coord },
}

/// Everything that changed on the board as the result of one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub player: Player,
    /// The destination cell that received the new piece.
    pub placed: Coord,
    /// Captured cells, in direction order.
    pub flipped: Vec<Coord>,
    /// Bonus points earned by captures and by the landing cell.
    pub bonus_gained: u32,
}

// =============================================================================
// Board
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dimension: usize,
    cells: Vec<Cell>,
    /// Index of owned coordinates per player, kept in step with `cells`.
    owned_by: [BTreeSet<Coord>; 2],
    bonus_total: [u32; 2],
    result: Option<Outcome>,
    tiebreak: FullBoardTiebreak,
}

impl Board {
    /// Create a board with the standard opening and randomly placed bonus cells.
    pub fn new(config: &BoardConfig, rng: &mut fastrand::Rng) -> Result<Self, BoardError> {
        let mut board = Self::empty(config.dimension, config.tiebreak)?;
        board.seed_opening();
        for _ in 0..config.bonus_cells {
            let at = Coord::new(rng.usize(..board.dimension), rng.usize(..board.dimension));
            trace!("bonus cell at {at}");
            let i = board.idx(at);
            board.cells[i].has_bonus = true;
        }
        Ok(board)
    }

    /// Create a board whose bonus cells are derived from `seed`.
    ///
    /// The same dimension and seed always give the same board.
    pub fn with_seed(dimension: usize, seed: u64) -> Result<Self, BoardError> {
        let config = BoardConfig {
            dimension,
            ..BoardConfig::default()
        };
        Self::new(&config, &mut fastrand::Rng::with_seed(seed))
    }

    /// Create a board with the standard opening and the given bonus cells.
    pub fn with_bonus_cells(dimension: usize, bonus: &[Coord]) -> Result<Self, BoardError> {
        let mut board = Self::empty(dimension, FullBoardTiebreak::default())?;
        board.seed_opening();
        for &at in bonus {
            if !board.contains(at) {
                return Err(BoardError::OutOfBounds(at));
            }
            let i = board.idx(at);
            board.cells[i].has_bonus = true;
        }
        Ok(board)
    }

    /// Build an arbitrary position from text rows, one string per row.
    ///
    /// Accepts the characters written by the `Display` impl: `B`, `W` and `.`
    /// for plain cells, `b`, `w` and `+` for the same cells carrying a bonus.
    /// Whitespace is ignored. Bonus totals start at zero.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let dimension = rows.len();
        let mut board = Self::empty(dimension, FullBoardTiebreak::default())?;
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != dimension {
                return Err(BoardError::RaggedRows {
                    row,
                    found: symbols.len(),
                    expected: dimension,
                });
            }
            for (col, ch) in symbols.into_iter().enumerate() {
                let (owner, has_bonus) = match ch {
                    CHAR_BLACK => (Some(Player::Black), false),
                    CHAR_WHITE => (Some(Player::White), false),
                    CHAR_EMPTY => (None, false),
                    CHAR_BLACK_BONUS => (Some(Player::Black), true),
                    CHAR_WHITE_BONUS => (Some(Player::White), true),
                    CHAR_EMPTY_BONUS => (None, true),
                    found => return Err(BoardError::BadCell { row, found }),
                };
                let at = Coord::new(col, row);
                let i = board.idx(at);
                board.cells[i].has_bonus = has_bonus;
                if let Some(player) = owner {
                    board.set_owner(at, player);
                }
            }
        }
        Ok(board)
    }

    /// Replace the full-board tiebreak rule.
    pub fn with_tiebreak(mut self, tiebreak: FullBoardTiebreak) -> Self {
        self.tiebreak = tiebreak;
        self
    }

    fn empty(dimension: usize, tiebreak: FullBoardTiebreak) -> Result<Self, BoardError> {
        if dimension % 2 != 0 || !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
            return Err(BoardError::InvalidDimension(dimension));
        }
        Ok(Self {
            dimension,
            cells: vec![Cell::default(); dimension * dimension],
            owned_by: [BTreeSet::new(), BTreeSet::new()],
            bonus_total: [0, 0],
            result: None,
            tiebreak,
        })
    }

    /// Place the four central pieces in the diagonal opening pattern.
    fn seed_opening(&mut self) {
        let c = (self.dimension - 1) / 2;
        self.set_owner(Coord::new(c, c + 1), Player::Black);
        self.set_owner(Coord::new(c + 1, c), Player::Black);
        self.set_owner(Coord::new(c, c), Player::White);
        self.set_owner(Coord::new(c + 1, c + 1), Player::White);
    }

    fn idx(&self, at: Coord) -> usize {
        at.row * self.dimension + at.col
    }

    /// Change a cell's owner and move it between the owned-cell indexes.
    fn set_owner(&mut self, at: Coord, player: Player) {
        let i = self.idx(at);
        if let Some(previous) = self.cells[i].owner {
            self.owned_by[previous.index()].remove(&at);
        }
        self.cells[i].owner = Some(player);
        self.owned_by[player.index()].insert(at);
    }

    /// The neighbor of `at` in direction `(dcol, drow)`, if it is on the board.
    fn step(&self, at: Coord, (dcol, drow): (isize, isize)) -> Option<Coord> {
        let col = at.col.checked_add_signed(dcol)?;
        let row = at.row.checked_add_signed(drow)?;
        (col < self.dimension && row < self.dimension).then_some(Coord { col, row })
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.col < self.dimension && at.row < self.dimension
    }

    pub fn cell(&self, at: Coord) -> Option<Cell> {
        self.contains(at).then(|| self.cells[self.idx(at)])
    }

    /// Owner of a cell. Off-board coordinates report no owner.
    pub fn owner(&self, at: Coord) -> Owner {
        self.cell(at).and_then(|cell| cell.owner)
    }

    pub fn has_bonus(&self, at: Coord) -> bool {
        self.cell(at).is_some_and(|cell| cell.has_bonus)
    }

    /// Every coordinate, row by row.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.dimension)
            .flat_map(move |row| (0..self.dimension).map(move |col| Coord::new(col, row)))
    }

    /// Coordinates currently owned by `player`, in ascending order.
    pub fn owned_cells(&self, player: Player) -> &BTreeSet<Coord> {
        &self.owned_by[player.index()]
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.owned_by[player.index()].len()
    }

    pub fn bonus_total(&self, player: Player) -> u32 {
        self.bonus_total[player.index()]
    }

    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.piece_count(Player::Black) - self.piece_count(Player::White)
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// The stored terminal result, if `check_terminal` has found one.
    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    pub fn tiebreak(&self) -> FullBoardTiebreak {
        self.tiebreak
    }

    /// Owned cells plus collected bonus points.
    pub fn score(&self, player: Player) -> u32 {
        self.piece_count(player) as u32 + self.bonus_total(player)
    }

    /// Map a player to their opponent.
    pub fn toggle(player: Player) -> Player {
        player.opponent()
    }

    // -------------------------------------------------------------------------
    // Move Generation
    // -------------------------------------------------------------------------

    /// Empty cells reachable from `from` by crossing one or more contiguous
    /// opponent pieces in a straight line.
    ///
    /// An unowned or off-board `from` has no destinations.
    pub fn legal_destinations(&self, from: Coord) -> BTreeSet<Coord> {
        let mut found = BTreeSet::new();
        let Some(player) = self.owner(from) else {
            return found;
        };
        let opponent = player.opponent();

        for dir in DIRECTIONS {
            let Some(mut at) = self.step(from, dir) else {
                continue;
            };
            if self.owner(at) != Some(opponent) {
                continue;
            }
            while let Some(next) = self.step(at, dir) {
                match self.owner(next) {
                    Some(p) if p == opponent => at = next,
                    Some(_) => break,
                    None => {
                        found.insert(next);
                        break;
                    }
                }
            }
        }
        found
    }

    /// All `(from, to)` pairs available to `player`, ordered by source then
    /// destination. Several pairs may share the same destination.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        self.owned_cells(player)
            .iter()
            .flat_map(|&from| {
                self.legal_destinations(from)
                    .into_iter()
                    .map(move |to| Move { from, to })
            })
            .collect()
    }

    /// Distinct destinations available to `player`.
    pub fn legal_targets(&self, player: Player) -> BTreeSet<Coord> {
        self.owned_cells(player)
            .iter()
            .flat_map(|&from| self.legal_destinations(from))
            .collect()
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        self.owned_cells(player)
            .iter()
            .any(|&from| !self.legal_destinations(from).is_empty())
    }

    /// Opponent pieces that `player` would capture by playing at `to`.
    ///
    /// A run converts only when a piece of `player` closes it; runs that end
    /// at an empty cell or the edge capture nothing. Empty when `to` is
    /// occupied or off the board.
    pub fn captures(&self, player: Player, to: Coord) -> Vec<Coord> {
        let mut flips = Vec::new();
        if !self.contains(to) || self.owner(to).is_some() {
            return flips;
        }

        for dir in DIRECTIONS {
            let mut line = Vec::new();
            let mut at = to;
            while let Some(next) = self.step(at, dir) {
                match self.owner(next) {
                    Some(p) if p == player => {
                        flips.append(&mut line);
                        break;
                    }
                    Some(_) => line.push(next),
                    None => break,
                }
                at = next;
            }
        }
        flips
    }

    // -------------------------------------------------------------------------
    // Move Application
    // -------------------------------------------------------------------------

    /// Place a piece for `player` at `to` and flip every captured line.
    ///
    /// A destination is legal exactly when it captures at least one piece,
    /// which is the same as appearing as a `to` in [`Board::legal_moves`].
    /// Captured bonus cells and a bonus landing cell each add
    /// [`BONUS_POINTS`] to the mover's bonus total.
    ///
    /// # Errors
    /// [`MoveError::InvalidMove`] if `to` is not a legal destination. The
    /// board is left untouched.
    pub fn apply_move(&mut self, player: Player, to: Coord) -> Result<MoveReport, MoveError> {
        let flipped = self.captures(player, to);
        if flipped.is_empty() {
            return Err(MoveError::InvalidMove { player, to });
        }

        let mut bonus_gained = 0;
        for &at in &flipped {
            self.set_owner(at, player);
            if self.has_bonus(at) {
                bonus_gained += BONUS_POINTS;
            }
        }
        self.set_owner(to, player);
        if self.has_bonus(to) {
            bonus_gained += BONUS_POINTS;
        }
        self.bonus_total[player.index()] += bonus_gained;

        debug!(
            "{player} plays {to}, flips {} (bonus +{bonus_gained})",
            flipped.len()
        );
        Ok(MoveReport {
            player,
            placed: to,
            flipped,
            bonus_gained,
        })
    }

    // -------------------------------------------------------------------------
    // Termination
    // -------------------------------------------------------------------------

    /// Detect the end of the game and remember the outcome.
    ///
    /// Once an outcome is stored it is returned unchanged for the rest of
    /// this board's life.
    pub fn check_terminal(&mut self) -> Option<Outcome> {
        if self.result.is_none() {
            self.result = self.evaluate_terminal();
        }
        self.result
    }

    /// The stored outcome, or a fresh evaluation that is not stored.
    pub fn terminal_state(&self) -> Option<Outcome> {
        self.result.or_else(|| self.evaluate_terminal())
    }

    /// Terminal rules, first match wins:
    /// 1. Black has a zero score: White wins.
    /// 2. White has a zero score: Black wins.
    /// 3. No empty cell: decided by the tiebreak rule.
    /// 4. Neither player can move: tie.
    fn evaluate_terminal(&self) -> Option<Outcome> {
        let black = self.score(Player::Black);
        let white = self.score(Player::White);

        if black == 0 {
            return Some(Outcome::WhiteWins);
        }
        if white == 0 {
            return Some(Outcome::BlackWins);
        }
        if self.is_full() {
            let outcome = match self.tiebreak {
                FullBoardTiebreak::PieceCount => Outcome::from_comparison(
                    self.piece_count(Player::Black) as u32,
                    self.piece_count(Player::White) as u32,
                ),
                FullBoardTiebreak::Score => Outcome::from_comparison(black, white),
            };
            return Some(outcome);
        }
        if !self.has_legal_move(Player::Black) && !self.has_legal_move(Player::White) {
            return Some(Outcome::Tie);
        }
        None
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dimension {
            for col in 0..self.dimension {
                let cell = self.cells[self.idx(Coord::new(col, row))];
                let ch = match (cell.owner, cell.has_bonus) {
                    (Some(Player::Black), false) => CHAR_BLACK,
                    (Some(Player::White), false) => CHAR_WHITE,
                    (None, false) => CHAR_EMPTY,
                    (Some(Player::Black), true) => CHAR_BLACK_BONUS,
                    (Some(Player::White), true) => CHAR_WHITE_BONUS,
                    (None, true) => CHAR_EMPTY_BONUS,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
