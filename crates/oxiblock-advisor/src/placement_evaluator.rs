//! Placement evaluation: scoring individual piece placements.
//!
//! # Heuristic
//!
//! [`HeuristicPlacementEvaluator`] scores a placement as a weighted sum of
//! integer terms, with the default [`HeuristicWeights`]:
//!
//! ```text
//! score = cells * 5
//!       + lines * 100
//!       + (lines > 1 ? lines * 50 : 0)
//!       - isolated_empty_cells * 10
//!       + near_complete_lines * 25
//!       + compactness * 5
//! ```
//!
//! `cells` is the size of the placed piece and `lines` the number of rows and
//! columns it clears. The remaining terms are measured on the board with the
//! piece filled in, before complete lines are removed
//! (see [`BoardAnalysis`](crate::board_analysis::BoardAnalysis)).
//!
//! Weights can be loaded from JSON; missing fields keep their defaults:
//!
//! ```
//! use oxiblock_advisor::placement_evaluator::HeuristicWeights;
//!
//! let weights: HeuristicWeights = serde_json::from_str(r#"{ "line_clear": 300 }"#).unwrap();
//! assert_eq!(weights.line_clear, 300);
//! assert_eq!(weights.compactness, HeuristicWeights::default().compactness);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::placement_analysis::PlacementAnalysis;

/// Evaluates piece placements by assigning scores.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    /// Evaluates a placement and returns a score (higher is better).
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> i64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeuristicWeights {
    /// Per cell of the placed piece.
    pub placed_cell: i64,
    /// Per cleared line.
    pub line_clear: i64,
    /// Per cleared line, only when more than one line clears at once.
    pub multi_line_bonus: i64,
    /// Penalty per isolated empty cell.
    pub isolated_empty_cell: i64,
    pub near_complete_line: i64,
    pub compactness: i64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            placed_cell: 5,
            line_clear: 100,
            multi_line_bonus: 50,
            isolated_empty_cell: 10,
            near_complete_line: 25,
            compactness: 5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicPlacementEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicPlacementEvaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl PlacementEvaluator for HeuristicPlacementEvaluator {
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> i64 {
        let w = &self.weights;
        let board = analysis.board_analysis();
        let cells = count(analysis.piece().cell_count());
        let lines = count(analysis.cleared().lines());
        let multi_line = if lines > 1 {
            lines * w.multi_line_bonus
        } else {
            0
        };

        cells * w.placed_cell + lines * w.line_clear + multi_line
            - i64::from(board.isolated_empty_cells()) * w.isolated_empty_cell
            + i64::from(board.near_complete_lines()) * w.near_complete_line
            + i64::from(board.compactness()) * w.compactness
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap()
}
