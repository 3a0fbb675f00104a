use serde::Serialize;

use crate::{
    PlacementError,
    core::{board::Board, piece::Piece, shape_library::ShapeLibrary},
};

use super::{
    GameStats, SessionConfig,
    game_field::GameField,
    piece_set::{PieceSeed, PieceSet},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// A game from the first placement to game over, with statistics.
///
/// All mutation goes through [`GameSession::try_place`] and
/// [`GameSession::reset`]. A rejected placement is reported as a
/// [`PlacementError`] and leaves the session exactly as it was.
///
/// # Example
///
/// ```
/// use oxiblock_engine::{GameSession, PieceSeed, PlacementError};
///
/// let mut session = GameSession::with_seed(PieceSeed::from_u128(42));
///
/// // Every piece fits at the top-left corner of an empty board.
/// let result = session.try_place(0, 0, 0).unwrap();
/// assert_eq!(result.lines_cleared, 0);
/// assert_eq!(session.statistics().total_pieces_placed, 1);
///
/// assert_eq!(
///     session.try_place(7, 0, 0),
///     Err(PlacementError::PieceIndexOutOfRange { index: 7, len: 2 })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
}

/// Outcome of an accepted placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementResult {
    /// The piece that was placed.
    pub piece: Piece,
    pub rows_cleared: usize,
    pub columns_cleared: usize,
    /// Rows plus columns.
    pub lines_cleared: usize,
    /// Combo after this placement; equal to `lines_cleared`.
    pub combo: usize,
    pub score_delta: usize,
    /// Set when this placement raised the best score; callers that persist the
    /// best score should store this value.
    pub new_best_score: Option<usize>,
    /// Whether the session ended with this placement.
    pub game_over: bool,
}

/// Flat summary of a placement attempt, accepted or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TryPlaceReport {
    pub accepted: bool,
    pub lines_cleared: usize,
    pub combo_count: usize,
    pub score_delta: usize,
}

impl From<&Result<PlacementResult, PlacementError>> for TryPlaceReport {
    fn from(result: &Result<PlacementResult, PlacementError>) -> Self {
        match result {
            Ok(placed) => Self {
                accepted: true,
                lines_cleared: placed.lines_cleared,
                combo_count: placed.combo,
                score_delta: placed.score_delta,
            },
            Err(_) => Self::default(),
        }
    }
}

/// Snapshot of a session's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStatistics {
    pub score: usize,
    pub best_score: usize,
    pub total_cleared_lines: usize,
    pub total_pieces_placed: usize,
    pub combo: usize,
    pub pieces_remaining: usize,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session on the standard library with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::from_field(GameField::new(
            ShapeLibrary::standard(),
            SessionConfig::default(),
        ))
    }

    /// Creates a session on the standard library with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_config(ShapeLibrary::standard(), SessionConfig::default(), seed)
    }

    #[must_use]
    pub fn with_config(library: ShapeLibrary, config: SessionConfig, seed: PieceSeed) -> Self {
        Self::from_field(GameField::with_seed(library, config, seed))
    }

    fn from_field(field: GameField) -> Self {
        let mut this = Self {
            field,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
        };
        this.update_state();
        this
    }

    /// Starts the best score at `best_score`, typically loaded from storage.
    #[must_use]
    pub fn with_best_score(mut self, best_score: usize) -> Self {
        self.stats.raise_best_score(best_score);
        self
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    /// Pieces currently offered, in index order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        self.field.pieces()
    }

    #[must_use]
    pub fn piece_set(&self) -> &PieceSet {
        self.field.piece_set()
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.field.piece_set().seed()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }

    #[must_use]
    pub fn statistics(&self) -> SessionStatistics {
        SessionStatistics {
            score: self.stats.score(),
            best_score: self.stats.best_score(),
            total_cleared_lines: self.stats.total_cleared_lines(),
            total_pieces_placed: self.stats.total_pieces_placed(),
            combo: self.stats.combo(),
            pieces_remaining: self.field.pieces().len(),
        }
    }

    /// Places the piece at `piece_index` with its origin at `(row, col)`.
    ///
    /// Complete rows and columns are cleared, the score is updated and the
    /// piece is consumed (drawing a new set if it was the last one). After the
    /// placement the session checks whether any offered piece still fits.
    pub fn try_place(
        &mut self,
        piece_index: usize,
        row: usize,
        col: usize,
    ) -> Result<PlacementResult, PlacementError> {
        if self.session_state.is_game_over() {
            return Err(PlacementError::GameOver);
        }

        let placed = self
            .field
            .place(piece_index, row, col)
            .inspect_err(|error| {
                tracing::debug!(piece_index, row, col, %error, "placement rejected");
            })?;
        let update = self
            .stats
            .complete_placement(placed.piece.cell_count(), &placed.cleared);
        tracing::debug!(
            piece_index,
            row,
            col,
            lines = placed.cleared.lines(),
            score_delta = update.delta,
            "piece placed"
        );
        if !placed.cleared.is_empty() {
            tracing::debug!(
                rows = ?placed.cleared.rows().collect::<Vec<_>>(),
                columns = ?placed.cleared.columns().collect::<Vec<_>>(),
                "lines cleared"
            );
        }

        self.update_state();

        Ok(PlacementResult {
            rows_cleared: placed.cleared.rows_cleared(),
            columns_cleared: placed.cleared.columns_cleared(),
            lines_cleared: placed.cleared.lines(),
            combo: self.stats.combo(),
            score_delta: update.delta,
            new_best_score: update.new_best,
            game_over: self.session_state.is_game_over(),
            piece: placed.piece,
        })
    }

    /// Starts over with an empty board and a fresh set, keeping the best score.
    pub fn reset(&mut self) {
        self.field.reset();
        self.stats.reset();
        self.session_state = SessionState::Playing;
        self.update_state();
    }

    fn update_state(&mut self) {
        if self.field.is_game_over() {
            tracing::info!(
                score = self.stats.score(),
                pieces_placed = self.stats.total_pieces_placed(),
                "game over"
            );
            self.session_state = SessionState::GameOver;
        }
    }
}
