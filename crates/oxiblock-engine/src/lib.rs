pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reason a placement request was rejected.
///
/// Rejections are ordinary outcomes of [`GameSession::try_place`]; they never
/// change the game state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum PlacementError {
    #[display("piece index {index} is outside the active set of {len} pieces")]
    PieceIndexOutOfRange { index: usize, len: usize },
    #[display("piece extends outside the board")]
    OutOfBounds,
    #[display("piece overlaps an occupied cell")]
    Occupied,
    #[display("game is over")]
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape has no cells")]
    Empty,
    #[display("shape has {count} cells, at most {max} are allowed")]
    TooManyCells { count: usize, max: usize },
    #[display("shape spans {height}x{width} cells, larger than the board")]
    TooLarge { height: i64, width: i64 },
    #[display("invalid shape notation '{input}'")]
    InvalidNotation { input: String },
}
