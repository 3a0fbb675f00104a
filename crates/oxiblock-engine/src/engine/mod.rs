//! Game rules and state management.
//!
//! This module builds the game on top of the core data structures:
//!
//! - [`GameField`] - The board and the pieces currently offered for it
//! - [`GameSession`] - A whole game with statistics and game-over tracking
//! - [`GameStats`] - Score, best score, lines cleared and combo
//! - [`PieceSet`] - Draws sets of pieces, never repeating the previous set
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`SessionConfig`] - Set size and redraw limit
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] (optionally with a seed and a custom library)
//! 2. Place one of the offered pieces with [`GameSession::try_place`]
//! 3. Complete rows and columns clear and the score is updated
//! 4. Once all offered pieces are used a new set is drawn
//! 5. The game ends when no offered piece fits anywhere
//!
//! # Example
//!
//! ```
//! use oxiblock_engine::GameSession;
//!
//! let mut session = GameSession::new();
//!
//! for _ in 0..20 {
//!     let Some((index, (row, col))) = session
//!         .pieces()
//!         .iter()
//!         .enumerate()
//!         .find_map(|(i, piece)| Some((i, session.board().valid_origins(piece.shape()).next()?)))
//!     else {
//!         assert!(session.is_game_over());
//!         break;
//!     };
//!     session.try_place(index, row, col).unwrap();
//! }
//!
//! println!("score: {}", session.statistics().score);
//! ```

pub use self::{game_field::*, game_session::*, game_stats::*, piece_set::*, session_config::*};

mod game_field;
mod game_session;
mod game_stats;
mod piece_set;
mod session_config;
