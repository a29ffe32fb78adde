//! Attack detection on a board snapshot.
//!
//! [`is_square_attacked`] takes a bare [`Board`] rather than a position so the
//! legality filter can ask it about scratch boards that never become the
//! game state.

use chess_core::{Board, Color, Piece, PieceKind, Square};

/// Knight jumps as (row, column) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King steps as (row, column) deltas.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Rook rays.
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Bishop rays.
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Queen rays.
pub(crate) const ALL_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

/// Returns true if any piece of `by_color` attacks `sq` on this board.
///
/// Probes, in order: rook/queen along the four orthogonal rays, bishop/queen
/// along the four diagonals, knight jumps, the two pawn capture squares, and
/// the adjacent squares for the king. A ray stops at the first occupied
/// square whatever its color.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    let rook = Piece::new(by_color, PieceKind::Rook);
    let bishop = Piece::new(by_color, PieceKind::Bishop);
    let queen = Piece::new(by_color, PieceKind::Queen);

    if ORTHOGONALS
        .iter()
        .filter_map(|&dir| first_piece_on_ray(board, sq, dir))
        .any(|piece| piece == rook || piece == queen)
    {
        return true;
    }

    if DIAGONALS
        .iter()
        .filter_map(|&dir| first_piece_on_ray(board, sq, dir))
        .any(|piece| piece == bishop || piece == queen)
    {
        return true;
    }

    if any_at(board, sq, &KNIGHT_OFFSETS, Piece::new(by_color, PieceKind::Knight)) {
        return true;
    }

    // An attacking pawn stands one row behind the target, from its own point of view.
    let pawn_row = -by_color.pawn_direction();
    if any_at(
        board,
        sq,
        &[(pawn_row, -1), (pawn_row, 1)],
        Piece::new(by_color, PieceKind::Pawn),
    ) {
        return true;
    }

    any_at(board, sq, &KING_OFFSETS, Piece::new(by_color, PieceKind::King))
}

/// Returns true if the king of the given color is attacked on this board.
pub fn is_king_attacked(board: &Board, king_color: Color) -> bool {
    match board.find_king(king_color) {
        Some(king_sq) => is_square_attacked(board, king_sq, king_color.opposite()),
        None => false,
    }
}

fn first_piece_on_ray(board: &Board, from: Square, (drow, dcol): (i8, i8)) -> Option<Piece> {
    let mut current = from;
    while let Some(next) = current.offset(drow, dcol) {
        if let Some(piece) = board.get(next) {
            return Some(piece);
        }
        current = next;
    }
    None
}

fn any_at(board: &Board, from: Square, offsets: &[(i8, i8)], wanted: Piece) -> bool {
    offsets
        .iter()
        .filter_map(|&(drow, dcol)| from.offset(drow, dcol))
        .any(|sq| board.get(sq) == Some(wanted))
}
