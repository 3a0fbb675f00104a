use crate::{
    PlacementError,
    core::{
        board::{Board, LineClear},
        piece::Piece,
        shape_library::ShapeLibrary,
    },
};

use super::{
    SessionConfig,
    piece_set::{PieceSeed, PieceSet},
};

/// The board together with the pieces currently offered for it.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    piece_set: PieceSet,
}

/// What a successful [`GameField::place`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlacement {
    pub piece: Piece,
    pub cleared: LineClear,
}

impl GameField {
    #[must_use]
    pub fn new(library: ShapeLibrary, config: SessionConfig) -> Self {
        Self::with_piece_set(PieceSet::new(library, config))
    }

    #[must_use]
    pub fn with_seed(library: ShapeLibrary, config: SessionConfig, seed: PieceSeed) -> Self {
        Self::with_piece_set(PieceSet::with_seed(library, config, seed))
    }

    fn with_piece_set(piece_set: PieceSet) -> Self {
        Self {
            board: Board::EMPTY,
            piece_set,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn piece_set(&self) -> &PieceSet {
        &self.piece_set
    }

    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        self.piece_set.pieces()
    }

    /// Validates a placement without applying it.
    pub fn check_placement(
        &self,
        index: usize,
        row: usize,
        col: usize,
    ) -> Result<&Piece, PlacementError> {
        let piece = self
            .piece_set
            .get(index)
            .ok_or(PlacementError::PieceIndexOutOfRange {
                index,
                len: self.piece_set.len(),
            })?;
        self.board.check_placement(piece.shape(), row, col)?;
        Ok(piece)
    }

    /// Places the piece at `index` with its origin at `(row, col)`, clears
    /// complete lines and consumes the piece.
    ///
    /// On error the field is left untouched.
    pub fn place(
        &mut self,
        index: usize,
        row: usize,
        col: usize,
    ) -> Result<FieldPlacement, PlacementError> {
        let Self { board, piece_set } = self;
        let piece = piece_set
            .get(index)
            .ok_or(PlacementError::PieceIndexOutOfRange {
                index,
                len: piece_set.len(),
            })?;
        board.check_placement(piece.shape(), row, col)?;
        board.fill_shape(piece.shape(), row, col, piece.tag());
        let cleared = board.clear_lines();
        let piece = piece_set
            .take(index)
            .expect("piece index was validated above");
        Ok(FieldPlacement { piece, cleared })
    }

    /// Returns `true` if no offered piece fits anywhere on the board.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        !self
            .piece_set
            .pieces()
            .iter()
            .any(|piece| self.board.can_place_anywhere(piece.shape()))
    }

    /// Empties the board and draws a fresh set.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.piece_set.reset();
    }
}
