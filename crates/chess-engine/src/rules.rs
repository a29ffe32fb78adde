//! Game status classification.

use std::fmt;

/// Status of a position from the point of view of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Not in check and at least one legal move.
    Normal,
    /// In check with at least one legal move.
    Check,
    /// In check with no legal moves. The side to move has lost.
    Checkmate,
    /// Not in check with no legal moves. The game is drawn.
    Stalemate,
}

impl GameStatus {
    /// Derives the status from the two facts that decide it.
    pub const fn classify(in_check: bool, has_legal_moves: bool) -> Self {
        match (in_check, has_legal_moves) {
            (false, true) => GameStatus::Normal,
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
        }
    }

    /// Returns true if no further moves can be played.
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Normal => "normal",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        write!(f, "{}", s)
    }
}
