//! Weiqi-Rust: a Go rule engine with a heuristic AI opponent.
//!
//! The engine enforces captures, suicide and simple ko on square boards,
//! keeps the move history and capture counts, and scores by area with komi.
//! The AI picks moves from the legal set with a weighted heuristic
//! evaluator at three difficulty levels and explains its choice.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, komi and heuristic parameters
//! - [`grid`] - Stones on a square grid and neighbor geometry
//! - [`group`] - Connected groups, liberties and capture detection
//! - [`territory`] - Empty-region ownership
//! - [`analysis`] - Whole-position report and move log
//! - [`board`] - Rules, move history and scoring
//! - [`coord`] - GTP vertex notation
//! - [`heuristics`] - Per-axis move heuristics and reason tags
//! - [`evaluator`] - Weighted combination of heuristic axes
//! - [`selector`] - Difficulty-tiered move selection
//! - [`config`] - Game configuration
//! - [`session`] - Human-vs-AI games and a session store
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use weiqi_rust::board::{Board, Move};
//! use weiqi_rust::grid::Color;
//! use weiqi_rust::selector::{Difficulty, MoveSelector};
//!
//! let mut board = Board::new(9).unwrap();
//! board.place_stone((2, 2)).unwrap();
//!
//! let mut ai = MoveSelector::with_seed(Color::White, Difficulty::Hard, 7);
//! let decision = ai.get_move(&board);
//! assert_ne!(decision.mv, Move::Pass);
//! board.play(decision.mv).unwrap();
//! println!("{}", decision.rationale);
//! ```

pub mod analysis;
pub mod board;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod evaluator;
pub mod grid;
pub mod group;
pub mod gtp;
pub mod heuristics;
pub mod selector;
pub mod session;
pub mod territory;

pub use analysis::{LogEntry, PositionAnalysis};
pub use board::{Board, BoardSnapshot, Move, MoveRecord, Score};
pub use config::GameConfig;
pub use error::{EvalError, GoError, IllegalReason};
pub use grid::{Color, Grid, Point};
pub use selector::{Decision, Difficulty, MoveSelector};
pub use session::{Game, SessionId, SessionStore};
