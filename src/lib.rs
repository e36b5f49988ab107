//! othello-rs: an Othello/Reversi rules engine with bonus cells.
//!
//! Some cells on each board carry a bonus marker chosen at random when the
//! board is created. Capturing or landing on one adds two points to the
//! mover's score on top of the owned-cell count.
//!
//! ## Modules
//!
//! - [`constants`] - Board bounds, bonus scoring and direction offsets
//! - [`board`] - Board state, move generation, captures and game end
//! - [`selector`] - Uniform random move selection
//! - [`game`] - Turn order, passing and the computer opponent
//! - [`protocol`] - Line-based text protocol over a game session
//!
//! ## Example
//!
//! ```
//! use othello_rs::board::{Board, Coord, Player};
//! use othello_rs::selector::{RandomSelector, Selection};
//!
//! // Standard 8x8 opening with reproducible bonus cells
//! let mut board = Board::with_seed(8, 42).unwrap();
//!
//! // Black opens by capturing one piece
//! let report = board.apply_move(Player::Black, Coord::new(2, 3)).unwrap();
//! assert_eq!(report.flipped, vec![Coord::new(3, 3)]);
//!
//! // White answers with a random legal move
//! let mut selector = RandomSelector::with_seed(7);
//! if let Selection::Move(mv) = selector.select_move(Player::White, &board) {
//!     board.apply_move(Player::White, mv.to).unwrap();
//! }
//! println!("{board}");
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod protocol;
pub mod selector;
