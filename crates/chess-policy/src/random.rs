//! Uniform random choice.

use chess_core::Move;
use chess_engine::Position;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::MovePolicy;

/// Plays a uniformly random legal move.
#[derive(Debug)]
pub struct RandomPolicy<R> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        RandomPolicy { rng }
    }
}

impl<R: Rng> MovePolicy for RandomPolicy<R> {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, position: &mut Position) -> Option<Move> {
        let legal = position.legal_moves();
        let m = legal.as_slice().choose(&mut self.rng).copied()?;
        debug!(policy = self.name(), mov = %m, "chose move");
        Some(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn picks_only_legal_moves() {
        let mut policy = RandomPolicy::new(StdRng::seed_from_u64(3));
        let mut position = Position::startpos();
        let legal = position.legal_moves();
        for _ in 0..50 {
            let m = policy.choose_move(&mut position).unwrap();
            assert!(legal.contains(&m));
        }
    }

    #[test]
    fn spreads_over_several_moves() {
        let mut policy = RandomPolicy::new(StdRng::seed_from_u64(11));
        let mut position = Position::startpos();
        let seen: HashSet<Move> = (0..200)
            .filter_map(|_| policy.choose_move(&mut position))
            .collect();
        assert!(seen.len() > 10);
    }
}
