//! Rules for awarding a seat when two or more quotients are exactly equal.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::entities::PartyVotes;

/// How an exact quotient tie is resolved.
///
/// Dutch electoral law draws lots. `ListOrder` and `MostVotes` are
/// deterministic substitutes; `Lot` simulates the draw with a seeded
/// generator so a given seed always reproduces the same outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The party listed first wins.
    #[default]
    ListOrder,
    /// The party with more votes wins; equal votes fall back to list order.
    MostVotes,
    /// Seeded drawing of lots.
    Lot { seed: u64 },
}

/// Per-run tie resolution state.
pub(crate) enum TieBreaker {
    ListOrder,
    MostVotes,
    Lot(StdRng),
}

impl TieBreaker {
    pub(crate) fn new(rule: TieBreak) -> Self {
        match rule {
            TieBreak::ListOrder => TieBreaker::ListOrder,
            TieBreak::MostVotes => TieBreaker::MostVotes,
            TieBreak::Lot { seed } => TieBreaker::Lot(StdRng::seed_from_u64(seed)),
        }
    }

    /// Pick one of `tied` (indices into `parties`, ascending list order).
    pub(crate) fn resolve(&mut self, tied: &[usize], parties: &[PartyVotes]) -> Option<usize> {
        match self {
            TieBreaker::ListOrder => tied.first().copied(),
            TieBreaker::MostVotes => tied.iter().copied().reduce(|best, idx| {
                if parties[idx].votes > parties[best].votes {
                    idx
                } else {
                    best
                }
            }),
            TieBreaker::Lot(rng) => {
                if tied.is_empty() {
                    None
                } else {
                    Some(tied[rng.gen_range(0..tied.len())])
                }
            }
        }
    }
}
