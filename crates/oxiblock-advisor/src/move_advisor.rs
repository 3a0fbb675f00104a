//! Move ranking and selection.
//!
//! [`MoveAdvisor`] enumerates every legal `(piece, row, col)` for the offered
//! pieces, simulates each one with [`PlacementAnalysis`] and scores it with a
//! [`PlacementEvaluator`].
//!
//! # Scan Order and Ties
//!
//! Candidates are visited piece by piece, then row by row, then column by
//! column. [`MoveAdvisor::best_move`] only replaces its current best on a
//! strictly greater score, so among equal scores the first move in scan order
//! wins. [`MoveAdvisor::evaluate`] sorts with a stable sort and therefore keeps
//! the same order among ties.
//!
//! # Design: Greedy One-Step Lookahead
//!
//! Only the immediate placement is evaluated; the advisor does not plan for the
//! rest of the set or future sets.

use oxiblock_engine::{Board, GameSession, Piece, PieceSeed, SessionStatistics};
use serde::Serialize;

use crate::{
    placement_analysis::PlacementAnalysis,
    placement_evaluator::{HeuristicPlacementEvaluator, PlacementEvaluator},
};

/// Score at and above which a suggestion has full confidence.
pub const FULL_CONFIDENCE_SCORE: i64 = 500;

/// A legal placement with its heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedMove {
    pub piece_index: usize,
    pub row: usize,
    pub col: usize,
    pub score: i64,
}

/// The best move together with how strongly it is recommended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Suggestion {
    pub best: RankedMove,
    /// `score / 500` clamped to `[0.0, 1.0]`.
    pub confidence: f32,
}

/// Result of a session played by the advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub seed: PieceSeed,
    pub turns: usize,
    pub game_over: bool,
    pub statistics: SessionStatistics,
}

#[derive(Debug)]
pub struct MoveAdvisor<'a> {
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl Default for MoveAdvisor<'_> {
    fn default() -> Self {
        Self::new(Box::new(HeuristicPlacementEvaluator::default()))
    }
}

impl<'a> MoveAdvisor<'a> {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    /// Scores every legal placement of every piece, best first.
    ///
    /// Returns an empty list if no piece fits.
    #[must_use]
    pub fn evaluate(&self, board: &Board, pieces: &[Piece]) -> Vec<RankedMove> {
        let mut moves = self.scored_moves(board, pieces).collect::<Vec<_>>();
        moves.sort_by(|a, b| b.score.cmp(&a.score));
        moves
    }

    /// Returns the highest-scoring legal placement, the earliest one on ties.
    #[must_use]
    pub fn best_move(&self, board: &Board, pieces: &[Piece]) -> Option<RankedMove> {
        let mut best: Option<RankedMove> = None;
        for candidate in self.scored_moves(board, pieces) {
            if best.is_none_or(|best| candidate.score > best.score) {
                best = Some(candidate);
            }
        }
        best
    }

    #[must_use]
    pub fn suggest(&self, board: &Board, pieces: &[Piece]) -> Option<Suggestion> {
        let best = self.best_move(board, pieces)?;
        Some(Suggestion {
            best,
            confidence: confidence(best.score),
        })
    }

    /// Suggests a move for the current state of `session`.
    #[must_use]
    pub fn suggest_for(&self, session: &GameSession) -> Option<Suggestion> {
        self.suggest(session.board(), session.pieces())
    }

    /// Whether `session` still accepts placements.
    #[must_use]
    pub fn can_continue(session: &GameSession) -> bool {
        !session.is_game_over()
    }

    #[must_use]
    pub fn fill_ratio(board: &Board) -> f32 {
        board.fill_ratio()
    }

    /// Plays `session` with the best move each turn until the game is over or
    /// `turn_limit` placements have been made. Stops early if the session
    /// rejects a placement.
    pub fn play_session(&self, session: &mut GameSession, turn_limit: usize) -> SessionSummary {
        let mut turns = 0;
        while turns < turn_limit {
            let Some(best) = self.best_move(session.board(), session.pieces()) else {
                break;
            };
            if let Err(error) = session.try_place(best.piece_index, best.row, best.col) {
                tracing::warn!(
                    piece_index = best.piece_index,
                    row = best.row,
                    col = best.col,
                    %error,
                    "suggested placement rejected"
                );
                break;
            }
            turns += 1;
        }
        tracing::debug!(
            turns,
            score = session.statistics().score,
            game_over = session.is_game_over(),
            "advisor session finished"
        );
        SessionSummary {
            seed: session.seed(),
            turns,
            game_over: session.is_game_over(),
            statistics: session.statistics(),
        }
    }

    fn scored_moves<'b>(
        &'b self,
        board: &'b Board,
        pieces: &'b [Piece],
    ) -> impl Iterator<Item = RankedMove> + 'b {
        pieces
            .iter()
            .enumerate()
            .flat_map(move |(piece_index, piece)| {
                board
                    .valid_origins(piece.shape())
                    .map(move |(row, col)| (piece_index, piece, row, col))
            })
            .map(move |(piece_index, piece, row, col)| {
                let analysis = PlacementAnalysis::from_board(board, piece, row, col);
                RankedMove {
                    piece_index,
                    row,
                    col,
                    score: self.placement_evaluator.evaluate_placement(&analysis),
                }
            })
    }
}

/// Maps a move score to a confidence in `[0.0, 1.0]`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn confidence(score: i64) -> f32 {
    if score <= 0 {
        0.0
    } else if score >= FULL_CONFIDENCE_SCORE {
        1.0
    } else {
        score as f32 / FULL_CONFIDENCE_SCORE as f32
    }
}
