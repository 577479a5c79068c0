//! Party definitions and the plain records passed between engine stages.

use serde::{Deserialize, Serialize};

use super::{IdeologyVector, PartyId};

/// A party contesting an election.
///
/// The seat count is derived: it is only ever written by the allocator via
/// [`ElectionResult::allocate`](super::ElectionResult::allocate) and is ignored
/// when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,

    /// Valid votes received.
    #[serde(default)]
    pub vote_count: u64,

    /// Position on each policy dimension.
    #[serde(default)]
    pub ideology: IdeologyVector,

    #[serde(default, skip_deserializing)]
    seat_count: u32,
}

impl Party {
    /// Create a new party with no votes and no ideology.
    pub fn new(id: impl Into<PartyId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vote_count: 0,
            ideology: IdeologyVector::default(),
            seat_count: 0,
        }
    }

    /// Set the vote count.
    pub fn with_votes(mut self, votes: u64) -> Self {
        self.vote_count = votes;
        self
    }

    /// Set the ideology vector.
    pub fn with_ideology(mut self, ideology: impl Into<IdeologyVector>) -> Self {
        self.ideology = ideology.into();
        self
    }

    /// Seats assigned by the last allocation (0 before allocation).
    pub fn seat_count(&self) -> u32 {
        self.seat_count
    }

    /// Share of `total_votes` won by this party, in `[0, 1]`.
    pub fn vote_share(&self, total_votes: u64) -> f64 {
        if total_votes == 0 {
            0.0
        } else {
            self.vote_count as f64 / total_votes as f64
        }
    }

    pub(crate) fn set_seat_count(&mut self, seats: u32) {
        self.seat_count = seats;
    }
}

/// Allocator input: a party and its vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyVotes {
    pub party: PartyId,
    pub votes: u64,
}

impl PartyVotes {
    pub fn new(party: impl Into<PartyId>, votes: u64) -> Self {
        Self {
            party: party.into(),
            votes,
        }
    }
}

/// Allocator output: a party, its votes and the seats it won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySeats {
    pub party: PartyId,
    pub votes: u64,
    pub seats: u32,
}

/// Coalition analyzer input: a party's seats and ideological position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyProfile {
    pub party: PartyId,
    pub seats: u32,
    pub ideology: IdeologyVector,
}

impl PartyProfile {
    pub fn new(party: impl Into<PartyId>, seats: u32, ideology: impl Into<IdeologyVector>) -> Self {
        Self {
            party: party.into(),
            seats,
            ideology: ideology.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_party() {
        let party = Party::new("D66", "Democraten 66").with_votes(656_292);
        assert_eq!(party.id, PartyId::new("D66"));
        assert_eq!(party.vote_count, 656_292);
        assert_eq!(party.seat_count(), 0);
        assert!(party.ideology.is_empty());
    }

    #[test]
    fn test_vote_share() {
        let party = Party::new("A", "Alpha").with_votes(25);
        assert!((party.vote_share(100) - 0.25).abs() < 1e-12);
        assert_eq!(party.vote_share(0), 0.0);
    }

    #[test]
    fn test_seat_count_is_not_deserialized() {
        let json = r#"{"id":"A","name":"Alpha","vote_count":10,"seat_count":99}"#;
        let party: Party = serde_json::from_str(json).unwrap();
        assert_eq!(party.seat_count(), 0);
        assert_eq!(party.vote_count, 10);
    }

    #[test]
    fn test_negative_votes_rejected_by_deserialization() {
        let json = r#"{"id":"A","name":"Alpha","vote_count":-5}"#;
        assert!(serde_json::from_str::<Party>(json).is_err());
    }
}
