//! Minimum-energy solver for room-sorting grid puzzles.
//!
//! Given a walled grid with a hall row and four room columns, each reserved
//! for one piece type, this crate computes the minimum total energy needed
//! to move every piece into its own room. Moves cost a per-type multiplier
//! times the step distance traveled; the search is uniform-cost over the
//! implicit graph of board configurations.

pub mod board;
pub mod moves;
pub mod reachability;
pub mod search;

// Re-export main types
pub use board::{Board, ParseError, Piece, Position, Tile, TileKind};
pub use moves::possible_moves;
pub use reachability::reachable_tiles;
pub use search::{solve, Outcome, SolveResult};
