//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and its
//! collaborators:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates (row-major, row 0 is Black's back rank)
//! - [`Board`] for the 8x8 grid of pieces
//! - [`Move`] for one ply
//! - the board text codec ([`FenParser`], [`Board::from_placement`])

mod board;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use board::Board;
pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveFlag};
pub use piece::{Piece, PieceKind};
pub use square::Square;
