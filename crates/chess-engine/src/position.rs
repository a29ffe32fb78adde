//! Chess position representation.
//!
//! A [`Position`] owns the board, the side to move, cached king squares, the
//! castling rights and en passant target, plus a history stack that lets
//! every applied move be undone exactly.

use chess_core::{Board, Color, FenError, FenParser, Move, PieceKind, Square};
use tracing::{debug, warn};

use crate::movegen::{self, MoveList};
use crate::rules::GameStatus;
use crate::EngineError;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        (self.0 & Self::kingside_flag(color)) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        (self.0 & Self::queenside_flag(color)) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.0 &= !(Self::kingside_flag(color) | Self::queenside_flag(color));
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        self.0 &= !Self::kingside_flag(color);
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        self.0 &= !Self::queenside_flag(color);
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns the rights remaining after `m` is played.
    ///
    /// A king move clears both rights of its color. Leaving or landing on a
    /// rook's home corner clears the right tied to that corner.
    pub fn after_move(self, m: Move) -> Self {
        let mut rights = self;
        if m.moved().kind == PieceKind::King {
            rights.remove_color(m.color());
        }
        for sq in [m.from(), m.to()] {
            match sq {
                Square::H1 => rights.remove_kingside(Color::White),
                Square::A1 => rights.remove_queenside(Color::White),
                Square::H8 => rights.remove_kingside(Color::Black),
                Square::A8 => rights.remove_queenside(Color::Black),
                _ => {}
            }
        }
        rights
    }

    /// Parses the FEN castling field ("KQkq", "Kq", "-").
    pub fn from_fen_field(field: &str) -> Self {
        let mut flags = 0u8;
        for c in field.chars() {
            match c {
                'K' => flags |= Self::WHITE_KINGSIDE,
                'Q' => flags |= Self::WHITE_QUEENSIDE,
                'k' => flags |= Self::BLACK_KINGSIDE,
                'q' => flags |= Self::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        CastlingRights::new(flags)
    }

    /// Formats the rights as a FEN castling field.
    pub fn to_fen_field(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        let mut field = String::new();
        if self.can_castle_kingside(Color::White) {
            field.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            field.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            field.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            field.push('q');
        }
        field
    }

    /// Drops every right whose king or rook is not on its home square.
    fn restricted_to(mut self, board: &Board) -> Self {
        for color in Color::ALL {
            let row = color.back_row();
            let at_home = |col: u8, kind: PieceKind| {
                board
                    .get(Square::new(row, col))
                    .is_some_and(|p| p.is(color, kind))
            };
            if !at_home(4, PieceKind::King) {
                self.remove_color(color);
            }
            if !at_home(7, PieceKind::Rook) {
                self.remove_kingside(color);
            }
            if !at_home(0, PieceKind::Rook) {
                self.remove_queenside(color);
            }
        }
        self
    }

    const fn kingside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    const fn queenside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }
}

/// One applied ply together with the state it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mov: Move,
    pub en_passant: Option<Square>,
    pub castling: CastlingRights,
}

/// Complete game state for one game session.
///
/// Mutated only through [`apply`](Position::apply) and
/// [`undo`](Position::undo); both either succeed fully or change nothing.
/// The history holds one entry per ply played since construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    /// King squares indexed by color, kept in step with the board.
    kings: [Square; 2],
    castling: CastlingRights,
    en_passant: Option<Square>,
    history: Vec<HistoryEntry>,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::new(Board::startpos(), Color::White).expect("STARTPOS is valid")
    }

    /// Creates a position from a board and side to move, with every castling
    /// right the layout allows and no en passant target.
    pub fn new(board: Board, side_to_move: Color) -> Result<Self, EngineError> {
        Self::with_state(board, side_to_move, CastlingRights::ALL, None)
    }

    /// Creates a position from a full state tuple.
    ///
    /// Castling rights whose king or rook is not on its home square are
    /// dropped. An en passant target must sit directly behind an enemy pawn
    /// that could have just double-stepped.
    pub fn with_state(
        board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> Result<Self, EngineError> {
        let mut kings = [Square::E1, Square::E8];
        for color in Color::ALL {
            let count = board.count(color, PieceKind::King);
            kings[color.index()] = match board.find_king(color) {
                Some(sq) if count == 1 => sq,
                _ => return Err(FenError::InvalidKingCount { color, count }.into()),
            };
        }

        if let Some(target) = en_passant {
            let them = side_to_move.opposite();
            let expected_row = match side_to_move {
                Color::White => 2,
                Color::Black => 5,
            };
            let pusher = target.offset(-side_to_move.pawn_direction(), 0);
            let valid = target.row() == expected_row
                && board.is_empty(target)
                && pusher
                    .and_then(|sq| board.get(sq))
                    .is_some_and(|p| p.is(them, PieceKind::Pawn));
            if !valid {
                return Err(FenError::InvalidEnPassantSquare(target.to_algebraic()).into());
            }
        }

        Ok(Position {
            castling: castling.restricted_to(&board),
            board,
            side_to_move,
            kings,
            en_passant,
            history: Vec::new(),
        })
    }

    /// Creates a position from a FEN string or a bare piece placement.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let parsed = FenParser::parse(fen)?;
        let board = Board::from_placement(&parsed.piece_placement)?;

        let side_to_move = match parsed.active_color {
            'b' => Color::Black,
            _ => Color::White,
        };

        let en_passant = if parsed.en_passant == "-" {
            None
        } else {
            Some(
                Square::from_algebraic(&parsed.en_passant)
                    .ok_or_else(|| FenError::InvalidEnPassantSquare(parsed.en_passant.clone()))?,
            )
        };

        Self::with_state(
            board,
            side_to_move,
            CastlingRights::from_fen_field(&parsed.castling),
            en_passant,
        )
    }

    /// Converts the position to a FEN string (placement, side, castling, en passant).
    pub fn to_fen(&self) -> String {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic());
        format!(
            "{} {} {} {}",
            self.board.to_placement(),
            side,
            self.castling.to_fen_field(),
            en_passant
        )
    }

    /// Returns the piece grid.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the color whose turn it is.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the cached square of the given color's king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Returns the castling rights still held.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the square a pawn may capture en passant onto this ply.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the applied plies, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the most recently applied move.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.mov)
    }

    /// Returns the number of plies applied since construction.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Returns all legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        movegen::generate_legal(self)
    }

    /// Finds the legal move between two squares, as typed by a user.
    pub fn find_move(&self, from: Square, to: Square) -> Option<Move> {
        self.legal_moves()
            .as_slice()
            .iter()
            .find(|m| m.from() == from && m.to() == to)
            .copied()
    }

    /// Applies a legal move.
    ///
    /// The move is matched against the current legal move list; the matched
    /// instance is the one committed, so its piece data comes from this board.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IllegalMove`] if `m` is not legal here. The
    /// position is left untouched.
    pub fn apply(&mut self, m: Move) -> Result<(), EngineError> {
        let legal = self.legal_moves();
        let Some(&mov) = legal.as_slice().iter().find(|lm| **lm == m) else {
            warn!(mov = %m, fen = %self.to_fen(), "rejected illegal move");
            return Err(EngineError::IllegalMove(m.to_uci()));
        };
        self.push_move(mov);
        debug!(mov = %mov, ply = self.ply(), "applied move");
        Ok(())
    }

    /// Reverts the most recent move and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyHistory`] when no move has been applied.
    pub fn undo(&mut self) -> Result<Move, EngineError> {
        match self.pop_move() {
            Some(mov) => {
                debug!(mov = %mov, ply = self.ply(), "undid move");
                Ok(mov)
            }
            None => {
                warn!("undo requested with empty history");
                Err(EngineError::EmptyHistory)
            }
        }
    }

    /// Commits a move already known to be legal.
    pub(crate) fn push_move(&mut self, m: Move) {
        let us = self.side_to_move;

        self.history.push(HistoryEntry {
            mov: m,
            en_passant: self.en_passant,
            castling: self.castling,
        });

        movegen::play_on_board(&mut self.board, m);

        if m.moved().kind == PieceKind::King {
            self.kings[us.index()] = m.to();
        }

        self.castling = self.castling.after_move(m);

        self.en_passant = if m.is_double_push() {
            Some(Square::new((m.from().row() + m.to().row()) / 2, m.from().col()))
        } else {
            None
        };

        self.side_to_move = us.opposite();
    }

    /// Pops and reverts the last move, if any.
    pub(crate) fn pop_move(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        let m = entry.mov;

        movegen::unplay_on_board(&mut self.board, m);

        if m.moved().kind == PieceKind::King {
            self.kings[m.color().index()] = m.from();
        }

        self.castling = entry.castling;
        self.en_passant = entry.en_passant;
        self.side_to_move = m.color();

        Some(m)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        movegen::in_check(self, self.side_to_move)
    }

    /// Classifies the position for the side to move.
    pub fn status(&self) -> GameStatus {
        GameStatus::classify(self.is_check(), !self.legal_moves().is_empty())
    }

    pub fn is_checkmate(&self) -> bool {
        self.status() == GameStatus::Checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.status() == GameStatus::Stalemate
    }

    pub fn is_game_over(&self) -> bool {
        self.status().is_terminal()
    }

    /// Returns the winner if the side to move has been checkmated.
    pub fn winner(&self) -> Option<Color> {
        self.is_checkmate().then(|| self.side_to_move.opposite())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
