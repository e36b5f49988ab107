//! Constants for board geometry, bonus scoring and menu sizes.
//!
//! Unlike a compile-time board size, the dimension is chosen per game, so the
//! geometry constants here are bounds and defaults rather than a fixed `N`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board dimension (8x8, the standard Othello board).
pub const DEFAULT_DIMENSION: usize = 8;

/// Smallest board that still fits the four-cell opening with a ring around it.
pub const MIN_DIMENSION: usize = 4;

/// Largest accepted board. Coordinates are printed as two digits at most.
pub const MAX_DIMENSION: usize = 26;

/// Small menu size.
pub const SMALL_DIMENSION: usize = 6;

/// Medium menu size.
pub const MEDIUM_DIMENSION: usize = 8;

/// Large menu size.
pub const LARGE_DIMENSION: usize = 10;

// =============================================================================
// Bonus Cells
// =============================================================================

/// Number of bonus markers dropped on a fresh board.
///
/// Markers are placed independently, so two picks may land on the same cell
/// and the board then carries fewer distinct bonus cells.
pub const DEFAULT_BONUS_CELLS: usize = 5;

/// Extra score for capturing or landing on a bonus cell.
pub const BONUS_POINTS: u32 = 2;

// =============================================================================
// Directions
// =============================================================================

/// The eight `(dcol, drow)` neighbor offsets.
/// Order: NW, W, SW, N, S, NE, E, SE
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// =============================================================================
// Text Representation
// =============================================================================

/// Black piece.
pub const CHAR_BLACK: char = 'B';

/// White piece.
pub const CHAR_WHITE: char = 'W';

/// Empty cell.
pub const CHAR_EMPTY: char = '.';

/// Black piece standing on a bonus cell.
pub const CHAR_BLACK_BONUS: char = 'b';

/// White piece standing on a bonus cell.
pub const CHAR_WHITE_BONUS: char = 'w';

/// Empty bonus cell.
pub const CHAR_EMPTY_BONUS: char = '+';
