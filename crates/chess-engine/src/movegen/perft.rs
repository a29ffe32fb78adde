//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! The walk plays and takes back moves on the position itself, so it also
//! exercises the undo path.

use super::generate_legal;
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
///
/// The position is restored before returning.
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        position.push_move(*m);
        nodes += perft(position, depth - 1);
        position.pop_move();
    }
    nodes
}

/// Perft with divide: node count below each root move, sorted by move text.
pub fn perft_divide(position: &mut Position, depth: u32) -> Vec<(String, u64)> {
    let moves = generate_legal(position);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        position.push_move(*m);
        let nodes = if depth > 1 {
            perft(position, depth - 1)
        } else {
            1
        };
        position.pop_move();
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
