pub use self::{board::*, piece::*, shape::*, shape_library::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape;
pub(crate) mod shape_library;

/// Side length of the square board.
pub const BOARD_SIZE: usize = 8;

/// Largest number of cells a single shape may cover.
pub const MAX_SHAPE_CELLS: usize = 9;
