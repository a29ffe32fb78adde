//! Material-greedy policies.

use chess_core::{Color, Move};
use chess_engine::Position;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::eval::{evaluate, CHECKMATE_SCORE, STALEMATE_SCORE};
use crate::{probe, MovePolicy};

/// Returns the legal moves in a random order, so ties break randomly.
fn shuffled_moves<R: Rng>(position: &Position, rng: &mut R) -> Vec<Move> {
    let mut moves = position.legal_moves().as_slice().to_vec();
    moves.shuffle(rng);
    moves
}

/// Plays the move with the best material balance one ply ahead.
///
/// Delivering checkmate beats any material gain.
#[derive(Debug)]
pub struct GreedyPolicy<R> {
    rng: R,
}

impl<R: Rng> GreedyPolicy<R> {
    pub fn new(rng: R) -> Self {
        GreedyPolicy { rng }
    }
}

impl<R: Rng> MovePolicy for GreedyPolicy<R> {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_move(&mut self, position: &mut Position) -> Option<Move> {
        let us = position.side_to_move();
        let mut best: Option<(Move, i32)> = None;

        for m in shuffled_moves(position, &mut self.rng) {
            let Some(score) = probe(position, m, |after| evaluate(after, us)) else {
                continue;
            };
            trace!(mov = %m, score, "scored candidate");
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((m, score));
            }
        }

        let (m, score) = best?;
        debug!(policy = self.name(), mov = %m, score, "chose move");
        Some(m)
    }
}

/// Plays the move that leaves the opponent the weakest best reply.
///
/// Each candidate is scored by the best score the opponent can reach with
/// one reply, from the opponent's point of view; the candidate with the
/// lowest such score wins. A candidate that ends the game is scored as is.
#[derive(Debug)]
pub struct TwoPlyPolicy<R> {
    rng: R,
}

impl<R: Rng> TwoPlyPolicy<R> {
    pub fn new(rng: R) -> Self {
        TwoPlyPolicy { rng }
    }
}

/// Best score the side to move (`them`) can reach with one move.
///
/// With no replies left, `them` is either mated or stalemated.
fn best_reply_score(position: &mut Position, them: Color) -> i32 {
    let replies = position.legal_moves();
    if replies.is_empty() {
        return if position.is_check() {
            -CHECKMATE_SCORE
        } else {
            STALEMATE_SCORE
        };
    }

    let mut best = -CHECKMATE_SCORE;
    for reply in &replies {
        if let Some(score) = probe(position, *reply, |after| evaluate(after, them)) {
            best = best.max(score);
        }
    }
    best
}

impl<R: Rng> MovePolicy for TwoPlyPolicy<R> {
    fn name(&self) -> &str {
        "two-ply"
    }

    fn choose_move(&mut self, position: &mut Position) -> Option<Move> {
        let them = position.side_to_move().opposite();
        let mut best: Option<(Move, i32)> = None;

        for m in shuffled_moves(position, &mut self.rng) {
            let Some(reply_score) = probe(position, m, |after| best_reply_score(after, them))
            else {
                continue;
            };
            trace!(mov = %m, reply_score, "scored candidate");
            if best.map_or(true, |(_, lowest)| reply_score < lowest) {
                best = Some((m, reply_score));
            }
        }

        let (m, reply_score) = best?;
        debug!(policy = self.name(), mov = %m, reply_score, "chose move");
        Some(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    fn choose<P: MovePolicy>(mut policy: P, fen: &str) -> String {
        let mut position = Position::from_fen(fen).unwrap();
        policy.choose_move(&mut position).unwrap().to_uci()
    }

    #[test]
    fn greedy_takes_the_hanging_queen() {
        assert_eq!(
            choose(GreedyPolicy::new(rng()), "4k3/8/8/3q4/8/8/8/3RK3 w - -"),
            "d1d5"
        );
    }

    #[test]
    fn greedy_prefers_mate_over_material() {
        // Ra8 mates; the knight on d1 is free to take but worth less.
        assert_eq!(
            choose(GreedyPolicy::new(rng()), "6k1/5ppp/8/8/8/8/8/R2nK3 w - -"),
            "a1a8"
        );
    }

    #[test]
    fn greedy_grabs_defended_pawn_but_two_ply_does_not() {
        // Qxd5 wins a pawn one ply ahead but exd5 wins the queen back.
        let fen = "4k3/8/4p3/3p4/8/8/8/3QK3 w - -";
        assert_eq!(choose(GreedyPolicy::new(rng()), fen), "d1d5");
        assert_ne!(choose(TwoPlyPolicy::new(rng()), fen), "d1d5");
    }

    #[test]
    fn two_ply_plays_mate_in_one() {
        assert_eq!(
            choose(TwoPlyPolicy::new(rng()), "6k1/5ppp/8/8/8/8/8/R3K3 w - -"),
            "a1a8"
        );
    }

    #[test]
    fn reply_score_without_replies() {
        let mut mated =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq -")
                .unwrap();
        assert_eq!(best_reply_score(&mut mated, Color::White), -CHECKMATE_SCORE);

        let mut stalemated = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - -").unwrap();
        assert_eq!(best_reply_score(&mut stalemated, Color::Black), STALEMATE_SCORE);
    }

    #[test]
    fn reply_score_is_the_opponents_best_material() {
        // Black to move can take the undefended rook on d5.
        let mut position = Position::from_fen("3qk3/8/8/3R4/8/8/8/7K b - -").unwrap();
        assert_eq!(best_reply_score(&mut position, Color::Black), 9);
    }

    #[test]
    fn two_ply_avoids_moves_that_allow_mate() {
        // Ra1 would allow Rxa1 mate on the back rank.
        let fen = "r5k1/5ppp/8/8/8/8/5PPP/1R4K1 w - -";
        let chosen = choose(TwoPlyPolicy::new(rng()), fen);
        let mut position = Position::from_fen(fen).unwrap();
        let (from, to) = Move::parse_squares(&chosen).unwrap();
        position.apply(position.find_move(from, to).unwrap()).unwrap();
        assert!(best_reply_score(&mut position, Color::Black) < CHECKMATE_SCORE);
    }
}
