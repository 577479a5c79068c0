//! Coalition candidates and the analysis report.

use electoral_rules::PartyId;
use serde::Serialize;
use std::cmp::Ordering;

/// A coalition of two or more parties. Immutable once built. Only `new`
/// constructs one, so members are always sorted and `is_viable` always
/// agrees with `seats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoalitionCandidate {
    members: Vec<PartyId>,
    seats: u32,
    compatibility_score: f64,
    weakest_pair_score: f64,
    is_viable: bool,
    surplus: u32,
}

impl CoalitionCandidate {
    pub(crate) fn new(
        mut members: Vec<PartyId>,
        seats: u32,
        compatibility_score: f64,
        weakest_pair_score: f64,
        legislature_seats: u32,
    ) -> Self {
        members.sort();
        let majority = legislature_seats / 2 + 1;
        Self {
            members,
            seats,
            compatibility_score,
            weakest_pair_score,
            is_viable: u64::from(seats) * 2 > u64::from(legislature_seats),
            surplus: seats.saturating_sub(majority),
        }
    }

    /// Member IDs in canonical (sorted) order.
    pub fn members(&self) -> &[PartyId] {
        &self.members
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, party: &PartyId) -> bool {
        self.members.binary_search(party).is_ok()
    }

    /// Combined seats of all members.
    pub fn seats(&self) -> u32 {
        self.seats
    }

    /// Aggregate compatibility in `[0, 10]`.
    pub fn compatibility_score(&self) -> f64 {
        self.compatibility_score
    }

    /// Lowest pair score among the members, whatever the aggregation policy.
    pub fn weakest_pair_score(&self) -> f64 {
        self.weakest_pair_score
    }

    pub fn is_viable(&self) -> bool {
        self.is_viable
    }

    /// Seats above the majority threshold.
    pub fn surplus(&self) -> u32 {
        self.surplus
    }

    /// Canonical key used to deduplicate coalitions.
    pub fn canonical_key(&self) -> &[PartyId] {
        &self.members
    }
}

/// Ranking order: higher compatibility first, then fewer members, then a
/// smaller surplus, then member IDs.
pub fn rank_order(a: &CoalitionCandidate, b: &CoalitionCandidate) -> Ordering {
    b.compatibility_score
        .total_cmp(&a.compatibility_score)
        .then_with(|| a.members.len().cmp(&b.members.len()))
        .then_with(|| a.surplus.cmp(&b.surplus))
        .then_with(|| a.members.cmp(&b.members))
}

/// Full result of a coalition analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoalitionAnalysis {
    pub total_seats: u32,
    pub majority_threshold: u32,

    /// A party that holds a majority on its own. Reported here rather than as
    /// a one-member coalition.
    pub single_party_majority: Option<PartyId>,

    /// Viable coalitions of two or more parties, ranked.
    pub coalitions: Vec<CoalitionCandidate>,

    /// Subsets visited by the enumeration after pruning.
    pub evaluated_subsets: u64,
}

impl CoalitionAnalysis {
    /// Highest-ranked coalition.
    pub fn best(&self) -> Option<&CoalitionCandidate> {
        self.coalitions.first()
    }

    /// Look up a coalition by its members, in any order.
    pub fn find(&self, members: &[PartyId]) -> Option<&CoalitionCandidate> {
        let mut key = members.to_vec();
        key.sort();
        self.coalitions.iter().find(|c| c.canonical_key() == key.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.coalitions.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
