//! Analysis of the board after a simulated placement.
//!
//! [`PlacementAnalysis`] combines what a placement did (the lines it would
//! clear) with the board right after the piece is filled in, before any line
//! is removed (via [`BoardAnalysis`]). The placement is applied to a copy of
//! the board, so the caller's board is never touched.
//!
//! ```
//! use oxiblock_advisor::placement_analysis::PlacementAnalysis;
//! use oxiblock_engine::{Board, ShapeLibrary};
//!
//! let board = Board::from_ascii("#######.");
//! let single = ShapeLibrary::standard().piece(0).unwrap();
//!
//! let analysis = PlacementAnalysis::from_board(&board, &single, 0, 7);
//! assert_eq!(analysis.cleared().lines(), 1);
//! assert_eq!(analysis.board_analysis().board(), &Board::from_ascii("########"));
//! assert_eq!(board, Board::from_ascii("#######."));
//! ```

use oxiblock_engine::{Board, LineClear, Piece};

use crate::board_analysis::BoardAnalysis;

#[derive(Debug)]
pub struct PlacementAnalysis {
    piece: Piece,
    row: usize,
    col: usize,
    cleared: LineClear,
    board_analysis: BoardAnalysis,
}

impl PlacementAnalysis {
    /// Simulates placing `piece` at `(row, col)` on a copy of `before_placement`.
    ///
    /// The placement must be legal (see [`Board::can_place`]). Board metrics are
    /// taken before complete lines are cleared.
    #[must_use]
    pub fn from_board(before_placement: &Board, piece: &Piece, row: usize, col: usize) -> Self {
        let mut filled = *before_placement;
        filled.fill_shape(piece.shape(), row, col, piece.tag());
        let mut after_clear = filled;
        let cleared = after_clear.clear_lines();

        Self {
            piece: piece.clone(),
            row,
            col,
            cleared,
            board_analysis: BoardAnalysis::from_board(&filled),
        }
    }

    #[must_use]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    #[must_use]
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    #[must_use]
    pub fn cleared(&self) -> &LineClear {
        &self.cleared
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }
}
