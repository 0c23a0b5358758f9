//! Error types for the rule engine, the evaluator, and sessions.

use std::fmt;

use thiserror::Error;

use crate::grid::Point;

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    OutOfBounds,
    Occupied,
    Ko,
    Suicide,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalReason::OutOfBounds => write!(f, "point is off the board"),
            IllegalReason::Occupied => write!(f, "point is not empty"),
            IllegalReason::Ko => write!(f, "retakes ko"),
            IllegalReason::Suicide => write!(f, "suicide"),
        }
    }
}

/// Errors raised by board mutations and session bookkeeping.
///
/// Every variant leaves the board exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GoError {
    #[error("illegal move at {point:?}: {reason}")]
    IllegalMove { point: Point, reason: IllegalReason },

    #[error("game is already over")]
    GameOver,

    #[error("not this side's turn")]
    OutOfTurn,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown session {0}")]
    UnknownSession(u64),
}

impl GoError {
    pub(crate) fn illegal(point: Point, reason: IllegalReason) -> Self {
        GoError::IllegalMove { point, reason }
    }
}

/// Raised when a candidate cannot be scored.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("score for {point:?} is not a finite number")]
    NonFinite { point: Point },

    #[error("candidate {point:?} is off the board")]
    OffBoard { point: Point },
}
