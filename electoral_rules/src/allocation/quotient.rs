//! Exact D'Hondt quotients.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The quotient `votes / divisor`, kept as an exact fraction.
///
/// Comparison cross-multiplies in `u128`, so equal fractions compare equal
/// (`200 / 2 == 100 / 1`) and no floating-point rounding can reorder seats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quotient {
    pub votes: u64,
    pub divisor: u64,
}

impl Quotient {
    /// Quotient for a party that already holds `seats_held` seats.
    pub fn for_next_seat(votes: u64, seats_held: u32) -> Self {
        Self {
            votes,
            divisor: u64::from(seats_held) + 1,
        }
    }

    /// Approximate value, for display and margins only.
    pub fn as_f64(&self) -> f64 {
        self.votes as f64 / self.divisor as f64
    }
}

impl PartialEq for Quotient {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Quotient {}

impl PartialOrd for Quotient {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quotient {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.votes) * u128::from(other.divisor);
        let rhs = u128::from(other.votes) * u128::from(self.divisor);
        lhs.cmp(&rhs)
    }
}
