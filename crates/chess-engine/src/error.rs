//! Engine error type.

use chess_core::FenError;
use thiserror::Error;

/// Errors returned by [`Position`](crate::Position) operations.
///
/// A failed operation never changes the position it was called on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The board text or state tuple does not describe a valid position.
    #[error("malformed board: {0}")]
    MalformedBoard(#[from] FenError),

    /// The move is not in the legal move list of the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Undo was requested but no move has been applied.
    #[error("no move to undo")]
    EmptyHistory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            EngineError::IllegalMove("e2e5".to_string()).to_string(),
            "illegal move: e2e5"
        );
        assert_eq!(EngineError::EmptyHistory.to_string(), "no move to undo");
        let err: EngineError = FenError::InvalidPartCount(5).into();
        assert!(err.to_string().starts_with("malformed board: "));
    }
}
