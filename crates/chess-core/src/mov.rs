//! Move representation.

use crate::{Color, Piece, PieceKind, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move or capture.
    Normal = 0,
    /// King moves two squares; the rook is relocated when the move is applied.
    Castle = 1,
    /// Pawn captures a pawn that just double-stepped past it.
    EnPassant = 2,
    /// Pawn reaches the last row and becomes a queen.
    Promotion = 3,
}

/// A single ply.
///
/// Moves are built by the move generator from a board snapshot, so the moved
/// and captured pieces always describe the board the move was generated on.
/// Two moves compare equal when origin, destination and flag match; the
/// piece fields are derived data and do not take part in identity.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    moved: Piece,
    captured: Option<Piece>,
    flag: MoveFlag,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        moved: Piece,
        captured: Option<Piece>,
        flag: MoveFlag,
    ) -> Self {
        Move {
            from,
            to,
            moved,
            captured,
            flag,
        }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the piece that moves.
    #[inline]
    pub const fn moved(self) -> Piece {
        self.moved
    }

    /// Returns the captured piece, if any (the bypassed pawn for en passant).
    #[inline]
    pub const fn captured(self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub fn is_castle(self) -> bool {
        self.flag == MoveFlag::Castle
    }

    #[inline]
    pub fn is_en_passant(self) -> bool {
        self.flag == MoveFlag::EnPassant
    }

    #[inline]
    pub fn is_promotion(self) -> bool {
        self.flag == MoveFlag::Promotion
    }

    /// Returns true if this is a pawn advancing two rows.
    #[inline]
    pub fn is_double_push(self) -> bool {
        self.moved.kind == PieceKind::Pawn && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// Returns the piece standing on the destination after the move.
    ///
    /// Promotion always produces a queen.
    #[inline]
    pub fn placed_piece(self) -> Piece {
        if self.is_promotion() {
            Piece::new(self.moved.color, PieceKind::Queen)
        } else {
            self.moved
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub fn promotion_piece(self) -> Option<PieceKind> {
        self.is_promotion().then_some(PieceKind::Queen)
    }

    /// Returns the square the captured piece stood on.
    ///
    /// For en passant this is beside the origin, on the destination column.
    #[inline]
    pub fn captured_square(self) -> Square {
        if self.is_en_passant() {
            Square::new(self.from.row(), self.to.col())
        } else {
            self.to
        }
    }

    /// Returns the rook's (from, to) squares for a castling move.
    pub fn castle_rook_squares(self) -> Option<(Square, Square)> {
        if !self.is_castle() {
            return None;
        }
        let row = self.from.row();
        if self.to.col() > self.from.col() {
            Some((Square::new(row, 7), Square::new(row, 5)))
        } else {
            Some((Square::new(row, 0), Square::new(row, 3)))
        }
    }

    /// Returns the color making the move.
    #[inline]
    pub const fn color(self) -> Color {
        self.moved.color
    }

    /// Returns the long algebraic notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = if self.is_promotion() { "q" } else { "" };
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// Parses typed coordinates ("e2e4", "e2 e4", "e7e8q") into an
    /// origin/destination pair.
    ///
    /// The result must still be matched against the legal move list; a bare
    /// square pair carries no piece information.
    pub fn parse_squares(s: &str) -> Option<(Square, Square)> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
        let squares = match compact.len() {
            4 => compact.as_str(),
            5 if compact.ends_with(|c: char| c == 'q' || c == 'Q') => compact.get(..4)?,
            _ => return None,
        };
        let from = Square::from_algebraic(squares.get(0..2)?)?;
        let to = Square::from_algebraic(squares.get(2..4)?)?;
        Some((from, to))
    }

    /// A placeholder move, never produced by the generator.
    pub const NULL: Move = Move {
        from: Square::A8,
        to: Square::A8,
        moved: Piece::new(Color::White, PieceKind::Pawn),
        captured: None,
        flag: MoveFlag::Normal,
    };
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.flag == other.flag
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.flag.hash(state);
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    const WHITE_PAWN: Piece = Piece::new(Color::White, PieceKind::Pawn);
    const BLACK_PAWN: Piece = Piece::new(Color::Black, PieceKind::Pawn);
    const WHITE_KING: Piece = Piece::new(Color::White, PieceKind::King);

    #[test]
    fn equality_ignores_captured_piece() {
        let quiet = Move::new(sq("e4"), sq("d5"), WHITE_PAWN, None, MoveFlag::Normal);
        let capture = Move::new(sq("e4"), sq("d5"), WHITE_PAWN, Some(BLACK_PAWN), MoveFlag::Normal);
        let en_passant =
            Move::new(sq("e5"), sq("d6"), WHITE_PAWN, Some(BLACK_PAWN), MoveFlag::EnPassant);
        assert_eq!(quiet, capture);
        assert_ne!(
            Move::new(sq("e5"), sq("d6"), WHITE_PAWN, Some(BLACK_PAWN), MoveFlag::Normal),
            en_passant
        );
    }

    #[test]
    fn move_uci() {
        let m = Move::new(sq("e2"), sq("e4"), WHITE_PAWN, None, MoveFlag::Normal);
        assert_eq!(m.to_uci(), "e2e4");
        assert!(m.is_double_push());

        let promo = Move::new(sq("e7"), sq("e8"), WHITE_PAWN, None, MoveFlag::Promotion);
        assert_eq!(promo.to_uci(), "e7e8q");
        assert_eq!(promo.placed_piece(), Piece::new(Color::White, PieceKind::Queen));
        assert_eq!(promo.promotion_piece(), Some(PieceKind::Queen));
        assert!(!promo.is_double_push());
    }

    #[test]
    fn en_passant_captured_square() {
        let m = Move::new(sq("e5"), sq("d6"), WHITE_PAWN, Some(BLACK_PAWN), MoveFlag::EnPassant);
        assert_eq!(m.captured_square(), sq("d5"));
        let normal = Move::new(sq("e5"), sq("d6"), WHITE_PAWN, Some(BLACK_PAWN), MoveFlag::Normal);
        assert_eq!(normal.captured_square(), sq("d6"));
    }

    #[test]
    fn castle_rook_squares() {
        let kingside = Move::new(Square::E1, Square::G1, WHITE_KING, None, MoveFlag::Castle);
        assert_eq!(kingside.castle_rook_squares(), Some((Square::H1, Square::F1)));

        let black_king = Piece::new(Color::Black, PieceKind::King);
        let queenside = Move::new(Square::E8, Square::C8, black_king, None, MoveFlag::Castle);
        assert_eq!(queenside.castle_rook_squares(), Some((Square::A8, Square::D8)));

        let step = Move::new(Square::E1, Square::F1, WHITE_KING, None, MoveFlag::Normal);
        assert_eq!(step.castle_rook_squares(), None);
    }

    #[test]
    fn parse_squares() {
        assert_eq!(Move::parse_squares("e2e4"), Some((sq("e2"), sq("e4"))));
        assert_eq!(Move::parse_squares("e2 e4"), Some((sq("e2"), sq("e4"))));
        assert_eq!(Move::parse_squares("e2-e4"), Some((sq("e2"), sq("e4"))));
        assert_eq!(Move::parse_squares("e7e8q"), Some((sq("e7"), sq("e8"))));
        assert_eq!(Move::parse_squares("e7e8n"), None);
        assert_eq!(Move::parse_squares("e2e9"), None);
        assert_eq!(Move::parse_squares("e2"), None);
        assert_eq!(Move::parse_squares("undo"), None);
    }

    #[test]
    fn move_debug_display() {
        let m = Move::new(sq("g1"), sq("f3"), Piece::new(Color::White, PieceKind::Knight), None, MoveFlag::Normal);
        assert_eq!(format!("{:?}", m), "Move(g1f3)");
        assert_eq!(format!("{}", m), "g1f3");
    }
}
