//! Chess rules engine.
//!
//! This crate provides:
//! - [`Position`] - the game state: board, side to move, castling rights,
//!   en passant target and a history of applied moves
//! - Legal move generation with check detection
//! - Reversible move application ([`Position::apply`] / [`Position::undo`])
//! - Game status classification ([`GameStatus`])
//!
//! # Architecture
//!
//! The board is a plain 8x8 grid of optional pieces. Move generation first
//! produces pseudo-legal candidates by walking the grid, then keeps only the
//! candidates that do not leave the mover's king attacked once simulated on
//! a scratch copy of the board.
//!
//! # Example
//!
//! ```
//! use chess_core::Move;
//! use chess_engine::{GameStatus, Position};
//!
//! let mut position = Position::startpos();
//! assert_eq!(position.legal_moves().len(), 20);
//!
//! let (from, to) = Move::parse_squares("e2e4").unwrap();
//! let m = position.find_move(from, to).unwrap();
//! position.apply(m).unwrap();
//! assert_eq!(position.status(), GameStatus::Normal);
//!
//! position.undo().unwrap();
//! assert_eq!(position, Position::startpos());
//! ```

mod error;
pub mod movegen;
mod position;
mod rules;

pub use error::EngineError;
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    generate_legal, generate_pseudo_legal, in_check, is_king_attacked, is_square_attacked,
    simulate, MoveList,
};
pub use position::{CastlingRights, HistoryEntry, Position};
pub use rules::GameStatus;
