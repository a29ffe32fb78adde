//! Move-selection policies.
//!
//! A [`MovePolicy`] picks a move for the side to move. Policies probe the
//! position by applying and undoing moves, so they take it mutably, but every
//! probe is paired with an undo and the position comes back unchanged.
//!
//! - [`RandomPolicy`] - uniform choice among the legal moves
//! - [`GreedyPolicy`] - best material balance after one ply
//! - [`TwoPlyPolicy`] - minimizes the opponent's best reply

mod eval;
mod greedy;
mod random;

pub use eval::{evaluate, material_score, piece_value, CHECKMATE_SCORE, STALEMATE_SCORE};
pub use greedy::{GreedyPolicy, TwoPlyPolicy};
pub use random::RandomPolicy;

use chess_core::Move;
use chess_engine::Position;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strategy for choosing the next move.
pub trait MovePolicy {
    /// Short name used in logs and the text host.
    fn name(&self) -> &str;

    /// Chooses a legal move for the side to move.
    ///
    /// Returns `None` only when the side to move has no legal moves.
    fn choose_move(&mut self, position: &mut Position) -> Option<Move>;
}

/// The available policies, as named in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    Random,
    Greedy,
    TwoPly,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Random, PolicyKind::Greedy, PolicyKind::TwoPly];

    /// Builds the policy, seeding its generator when a seed is given.
    pub fn build(self, seed: Option<u64>) -> Box<dyn MovePolicy> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new(rng)),
            PolicyKind::Greedy => Box::new(GreedyPolicy::new(rng)),
            PolicyKind::TwoPly => Box::new(TwoPlyPolicy::new(rng)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::Greedy => "greedy",
            PolicyKind::TwoPly => "two-ply",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies `m`, runs `f` on the resulting position, then undoes `m`.
///
/// Returns `None` if `m` is not legal here.
pub(crate) fn probe<T>(
    position: &mut Position,
    m: Move,
    f: impl FnOnce(&mut Position) -> T,
) -> Option<T> {
    position.apply(m).ok()?;
    let out = f(position);
    position.undo().ok().map(|_| out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_names_match_kinds() {
        for kind in PolicyKind::ALL {
            let policy = kind.build(Some(7));
            assert_eq!(policy.name(), kind.as_str());
        }
    }

    #[test]
    fn every_policy_returns_a_legal_move_and_restores_the_position() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq -";
        for kind in PolicyKind::ALL {
            let mut position = Position::from_fen(fen).unwrap();
            let before = position.clone();
            let mut policy = kind.build(Some(42));
            let m = policy.choose_move(&mut position).unwrap();
            assert_eq!(position, before, "{} left the position changed", kind);
            assert!(position.legal_moves().contains(&m));
        }
    }

    #[test]
    fn every_policy_returns_none_when_mated() {
        let mut position = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq -")
            .unwrap();
        for kind in PolicyKind::ALL {
            assert_eq!(kind.build(Some(1)).choose_move(&mut position), None);
        }
    }

    #[test]
    fn same_seed_same_choice() {
        let mut a = Position::startpos();
        let mut b = Position::startpos();
        let first = PolicyKind::Random.build(Some(9)).choose_move(&mut a);
        let second = PolicyKind::Random.build(Some(9)).choose_move(&mut b);
        assert_eq!(first, second);
    }
}
