//! The 8x8 grid of pieces.

use crate::fen::FenParser;
use crate::{Color, FenError, Piece, PieceKind, Square};
use std::fmt;

/// An 8x8 grid holding a piece or nothing on every square.
///
/// The board is a plain value: copying it is how the legality filter builds
/// scratch boards to simulate moves on.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates the standard starting layout.
    pub fn startpos() -> Self {
        Self::from_placement(FenParser::STARTPOS_PLACEMENT).expect("STARTPOS is valid")
    }

    /// Decodes a FEN piece placement field.
    ///
    /// The first rank in the text is row 0 (rank 8). The decoded board must
    /// hold exactly one king of each color.
    pub fn from_placement(text: &str) -> Result<Self, FenError> {
        FenParser::validate_piece_placement(text)?;

        let mut board = Board::empty();
        for (row, rank) in text.split('/').enumerate() {
            let mut col = 0u8;
            for c in rank.chars() {
                if let Some(run) = c.to_digit(10) {
                    col += run as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    board.set(Square::new(row as u8, col), Some(piece));
                    col += 1;
                }
            }
        }

        for color in Color::ALL {
            let count = board.count(color, PieceKind::King);
            if count != 1 {
                return Err(FenError::InvalidKingCount { color, count });
            }
        }

        Ok(board)
    }

    /// Encodes the board as a FEN piece placement field.
    pub fn to_placement(&self) -> String {
        let mut text = String::new();

        for row in 0..8u8 {
            let mut empty_count = 0;
            for col in 0..8u8 {
                match self.get(Square::new(row, col)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            text.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        text.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                text.push_str(&empty_count.to_string());
            }
            if row < 7 {
                text.push('/');
            }
        }

        text
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    /// Places a piece (or nothing) on a square, returning what was there.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[sq.index() as usize], piece)
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Iterates over occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Counts the pieces of the given color and kind.
    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.is(color, kind))
            .count()
    }

    /// Returns the square of the first king of the given color.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is(color, PieceKind::King))
            .map(|(sq, _)| sq)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_placement())
    }
}

/// Renders the board as text, rank 8 at the top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = self
                    .get(Square::new(row, col))
                    .map_or('.', |piece| piece.to_fen_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_layout() {
        let board = Board::startpos();
        assert_eq!(
            board.get(Square::E1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board.get(Square::D8),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert!(board.is_empty(Square::new(4, 4)));
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.count(Color::White, PieceKind::Pawn), 8);
    }

    #[test]
    fn placement_roundtrip() {
        let text = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R";
        let board = Board::from_placement(text).unwrap();
        assert_eq!(board.to_placement(), text);
        assert_eq!(Board::startpos().to_placement(), FenParser::STARTPOS_PLACEMENT);
    }

    #[test]
    fn rejects_missing_king() {
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8/4K3"),
            Err(FenError::InvalidKingCount {
                color: Color::Black,
                count: 0
            })
        );
    }

    #[test]
    fn rejects_two_kings() {
        assert_eq!(
            Board::from_placement("k7/8/8/8/8/8/8/K6K"),
            Err(FenError::InvalidKingCount {
                color: Color::White,
                count: 2
            })
        );
    }

    #[test]
    fn find_king_and_set() {
        let mut board = Board::startpos();
        assert_eq!(board.find_king(Color::Black), Some(Square::E8));
        let previous = board.set(Square::E8, None);
        assert_eq!(previous, Some(Piece::new(Color::Black, PieceKind::King)));
        assert_eq!(board.find_king(Color::Black), None);
    }

    #[test]
    fn display_grid() {
        let rendered = Board::startpos().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[4], "4  . . . . . . . .");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}
