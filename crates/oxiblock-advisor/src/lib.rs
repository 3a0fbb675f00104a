//! Heuristic move advisor for block-placement sessions.
//!
//! The advisor is a read-only function of the engine state. It never mutates a
//! [`GameSession`](oxiblock_engine::GameSession); every candidate placement is
//! simulated on a copy of the board.
//!
//! # Architecture
//!
//! ```text
//! Move Advisor (rank all legal moves, pick the best, play whole sessions)
//!     ↓ uses
//! Placement Evaluation (score a single placement)
//!     ↓ uses
//! Placement Analysis (board after placement and line clears)
//!     ↓ uses
//! Board Analysis (lazily computed board metrics)
//! ```
//!
//! # Modules
//!
//! - [`board_analysis`] - Lazy metrics: isolated empty cells, near-complete
//!   lines, compactness and fill ratio
//! - [`placement_analysis`] - Result of simulating one placement
//! - [`placement_evaluator`] - [`PlacementEvaluator`](placement_evaluator::PlacementEvaluator)
//!   trait and the weighted heuristic
//! - [`move_advisor`] - Move ranking, hints with confidence and greedy self-play
//!
//! # Example
//!
//! ```
//! use oxiblock_advisor::move_advisor::MoveAdvisor;
//! use oxiblock_engine::{GameSession, PieceSeed};
//!
//! let mut session = GameSession::with_seed(PieceSeed::from_u128(7));
//! let advisor = MoveAdvisor::default();
//!
//! let hint = advisor.suggest_for(&session).unwrap();
//! assert!((0.0..=1.0).contains(&hint.confidence));
//!
//! let best = hint.best;
//! session.try_place(best.piece_index, best.row, best.col).unwrap();
//! ```

pub mod board_analysis;
pub mod move_advisor;
pub mod placement_analysis;
pub mod placement_evaluator;
