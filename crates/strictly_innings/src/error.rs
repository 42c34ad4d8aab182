//! Engine error types.

use super::Delivery;

/// Error raised by the scoring engine.
///
/// Undo never fails. Recording fails only when a delivery would push a
/// running total past `u32::MAX`; the engine is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// An over must contain at least one legal ball.
    #[display("Balls per over must be at least 1, got {}", _0)]
    InvalidBallsPerOver(u32),

    /// Recording this delivery would overflow a running total.
    #[display("Recording {} would overflow the score", _0)]
    ScoreOverflow(Delivery),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for EngineError {}
