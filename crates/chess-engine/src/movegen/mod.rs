//! Move generation.
//!
//! Generation runs in two stages. [`generate_pseudo_legal`] walks the board in
//! row-major order and dispatches on the piece kind, respecting only geometry
//! and occupancy. [`generate_legal`] then plays every candidate on a scratch
//! copy of the board and drops those that leave the mover's king attacked.

mod attacks;
pub mod perft;

use crate::Position;
use chess_core::{Board, Color, Move, MoveFlag, Piece, PieceKind, Square};
use tracing::trace;

pub use attacks::{is_king_attacked, is_square_attacked};

use attacks::{ALL_DIRECTIONS, DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if the list holds a move equal to `m`.
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the side to move.
pub fn generate_legal(position: &Position) -> MoveList {
    let mut moves = generate_pseudo_legal(position);
    let us = position.side_to_move();
    let king_sq = position.king_square(us);

    moves.retain(|m| {
        let scratch = simulate(position.board(), *m);
        let king = if m.moved().kind == PieceKind::King {
            m.to()
        } else {
            king_sq
        };
        !is_square_attacked(&scratch, king, us.opposite())
    });

    trace!(side = %us, count = moves.len(), "generated legal moves");
    moves
}

/// Generates moves for the side to move without checking king safety.
pub fn generate_pseudo_legal(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let board = position.board();
    let us = position.side_to_move();

    for (from, piece) in board.pieces() {
        if piece.color != us {
            continue;
        }
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(position, from, piece, &mut moves),
            PieceKind::Knight => generate_step_moves(board, from, piece, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::Bishop => generate_slider_moves(board, from, piece, &DIAGONALS, &mut moves),
            PieceKind::Rook => generate_slider_moves(board, from, piece, &ORTHOGONALS, &mut moves),
            PieceKind::Queen => {
                generate_slider_moves(board, from, piece, &ALL_DIRECTIONS, &mut moves)
            }
            PieceKind::King => {
                generate_step_moves(board, from, piece, &KING_OFFSETS, &mut moves);
                generate_castling_moves(position, from, piece, &mut moves);
            }
        }
    }

    moves
}

/// Returns a copy of `board` with the move's effects applied.
pub fn simulate(board: &Board, m: Move) -> Board {
    let mut scratch = board.clone();
    play_on_board(&mut scratch, m);
    scratch
}

/// Applies a move's piece placement to a board.
///
/// Clears the origin, places the moved (or promoted) piece, removes the
/// en-passant victim and relocates the castling rook.
pub(crate) fn play_on_board(board: &mut Board, m: Move) {
    board.set(m.from(), None);
    board.set(m.to(), Some(m.placed_piece()));

    if m.is_en_passant() {
        board.set(m.captured_square(), None);
    }

    if let Some((rook_from, rook_to)) = m.castle_rook_squares() {
        let rook = board.set(rook_from, None);
        board.set(rook_to, rook);
    }
}

/// Exactly reverses [`play_on_board`].
pub(crate) fn unplay_on_board(board: &mut Board, m: Move) {
    board.set(m.from(), Some(m.moved()));

    if m.is_en_passant() {
        board.set(m.to(), None);
        board.set(m.captured_square(), m.captured());
    } else {
        board.set(m.to(), m.captured());
    }

    if let Some((rook_from, rook_to)) = m.castle_rook_squares() {
        let rook = board.set(rook_to, None);
        board.set(rook_from, rook);
    }
}

/// Generates pseudo-legal pawn pushes, captures and en passant.
fn generate_pawn_moves(position: &Position, from: Square, pawn: Piece, moves: &mut MoveList) {
    let board = position.board();
    let us = pawn.color;
    let dir = us.pawn_direction();
    let flag_for = |to: Square| {
        if to.row() == us.promotion_row() {
            MoveFlag::Promotion
        } else {
            MoveFlag::Normal
        }
    };

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            moves.push(Move::new(from, one, pawn, None, flag_for(one)));

            if from.row() == us.pawn_start_row() {
                if let Some(two) = one.offset(dir, 0) {
                    if board.is_empty(two) {
                        moves.push(Move::new(from, two, pawn, None, MoveFlag::Normal));
                    }
                }
            }
        }
    }

    for dcol in [-1, 1] {
        let Some(to) = from.offset(dir, dcol) else {
            continue;
        };
        match board.get(to) {
            Some(target) if target.color != us => {
                moves.push(Move::new(from, to, pawn, Some(target), flag_for(to)));
            }
            None if position.en_passant() == Some(to) => {
                let victim = board
                    .get(Square::new(from.row(), to.col()))
                    .filter(|p| p.is(us.opposite(), PieceKind::Pawn));
                if victim.is_some() {
                    moves.push(Move::new(from, to, pawn, victim, MoveFlag::EnPassant));
                }
            }
            _ => {}
        }
    }
}

/// Generates knight or king steps from a fixed offset table.
fn generate_step_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(drow, dcol) in offsets {
        let Some(to) = from.offset(drow, dcol) else {
            continue;
        };
        match board.get(to) {
            None => moves.push(Move::new(from, to, piece, None, MoveFlag::Normal)),
            Some(target) if target.color != piece.color => {
                moves.push(Move::new(from, to, piece, Some(target), MoveFlag::Normal))
            }
            Some(_) => {}
        }
    }
}

/// Generates sliding moves along each ray until the edge or a blocker.
fn generate_slider_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(drow, dcol) in directions {
        let mut current = from;
        while let Some(to) = current.offset(drow, dcol) {
            match board.get(to) {
                None => moves.push(Move::new(from, to, piece, None, MoveFlag::Normal)),
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(Move::new(from, to, piece, Some(target), MoveFlag::Normal));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Generates castling moves if the right is held, the path is clear and no
/// square the king stands on or crosses is attacked.
fn generate_castling_moves(position: &Position, from: Square, king: Piece, moves: &mut MoveList) {
    let board = position.board();
    let rights = position.castling();
    let us = king.color;
    let them = us.opposite();
    let row = us.back_row();

    if from != Square::new(row, 4) {
        return;
    }
    if !rights.can_castle_kingside(us) && !rights.can_castle_queenside(us) {
        return;
    }
    // Can't castle out of check
    if is_square_attacked(board, from, them) {
        return;
    }

    let rook = Some(Piece::new(us, PieceKind::Rook));
    let empty = |cols: std::ops::RangeInclusive<u8>| {
        cols.into_iter().all(|col| board.is_empty(Square::new(row, col)))
    };
    let safe = |cols: std::ops::RangeInclusive<u8>| {
        cols.into_iter()
            .all(|col| !is_square_attacked(board, Square::new(row, col), them))
    };

    if rights.can_castle_kingside(us)
        && board.get(Square::new(row, 7)) == rook
        && empty(5..=6)
        && safe(5..=6)
    {
        moves.push(Move::new(from, Square::new(row, 6), king, None, MoveFlag::Castle));
    }

    if rights.can_castle_queenside(us)
        && board.get(Square::new(row, 0)) == rook
        && empty(1..=3)
        && safe(2..=3)
    {
        moves.push(Move::new(from, Square::new(row, 2), king, None, MoveFlag::Castle));
    }
}

/// Returns true if the king of `color` is attacked in the position.
pub fn in_check(position: &Position, color: Color) -> bool {
    is_square_attacked(position.board(), position.king_square(color), color.opposite())
}
