//! Static scoring.

use chess_core::{Board, Color, PieceKind};
use chess_engine::{GameStatus, Position};

/// Score of a delivered checkmate.
pub const CHECKMATE_SCORE: i32 = 1000;

/// Score of a stalemate.
pub const STALEMATE_SCORE: i32 = 0;

/// Material value of a piece kind. The king has no material value.
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

/// Material balance of the board, White positive.
pub fn material_score(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| match piece.color {
            Color::White => piece_value(piece.kind),
            Color::Black => -piece_value(piece.kind),
        })
        .sum()
}

/// Scores the position from `perspective`'s point of view.
///
/// A checkmate scores [`CHECKMATE_SCORE`] for the winner and its negation for
/// the loser; a stalemate scores [`STALEMATE_SCORE`]. Otherwise the score is
/// the material balance.
pub fn evaluate(position: &Position, perspective: Color) -> i32 {
    match position.status() {
        GameStatus::Checkmate if position.side_to_move() == perspective => -CHECKMATE_SCORE,
        GameStatus::Checkmate => CHECKMATE_SCORE,
        GameStatus::Stalemate => STALEMATE_SCORE,
        GameStatus::Normal | GameStatus::Check => {
            let score = material_score(position.board());
            match perspective {
                Color::White => score,
                Color::Black => -score,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_balanced() {
        assert_eq!(material_score(&Board::startpos()), 0);
    }

    #[test]
    fn material_counts_white_positive() {
        let board = Board::from_placement("4k3/8/8/3q4/8/8/8/R3K3").unwrap();
        assert_eq!(material_score(&board), 5 - 9);
    }

    #[test]
    fn mate_scores_for_the_winner() {
        let position =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq -")
                .unwrap();
        assert_eq!(evaluate(&position, Color::Black), CHECKMATE_SCORE);
        assert_eq!(evaluate(&position, Color::White), -CHECKMATE_SCORE);
    }

    #[test]
    fn stalemate_scores_zero_regardless_of_material() {
        let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - -").unwrap();
        assert_eq!(evaluate(&position, Color::White), STALEMATE_SCORE);
    }
}
