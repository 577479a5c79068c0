//! Election results - the central structure holding parties, votes and seats.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{Party, PartyId, PartyProfile, PartyVotes};
use crate::allocation::{allocate, Allocation, AllocationConfig};
use crate::error::{InvalidInputError, LoadError};

/// Seats in the Dutch Tweede Kamer.
pub const TWEEDE_KAMER_SEATS: u32 = 150;

/// An election: the size of the legislature and the parties that contested it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionResult {
    /// Fixed size of the legislature.
    pub total_seats: u32,

    /// Parties in list order. List order is significant for tie-breaking.
    pub parties: Vec<Party>,
}

impl ElectionResult {
    /// Create an empty election for a legislature of `total_seats`.
    pub fn new(total_seats: u32) -> Self {
        Self {
            total_seats,
            parties: Vec::new(),
        }
    }

    /// Add a party to the end of the list.
    pub fn with_party(mut self, party: Party) -> Self {
        self.parties.push(party);
        self
    }

    /// Parse an election from JSON.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an election from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Smallest seat count that is a strict majority.
    pub fn majority_threshold(&self) -> u32 {
        self.total_seats / 2 + 1
    }

    /// Total valid votes cast.
    pub fn total_votes(&self) -> u64 {
        self.parties.iter().map(|p| p.vote_count).sum()
    }

    /// Sum of currently assigned seats.
    pub fn seat_total(&self) -> u64 {
        self.parties.iter().map(|p| u64::from(p.seat_count())).sum()
    }

    /// Whether the seats have been allocated (they sum to the legislature size).
    pub fn is_allocated(&self) -> bool {
        self.seat_total() == u64::from(self.total_seats)
    }

    /// Get party by ID.
    pub fn party(&self, id: &PartyId) -> Option<&Party> {
        self.parties.iter().find(|p| &p.id == id)
    }

    /// Seat count per party.
    pub fn seat_map(&self) -> BTreeMap<PartyId, u32> {
        self.parties
            .iter()
            .map(|p| (p.id.clone(), p.seat_count()))
            .collect()
    }

    /// Allocator input in list order.
    pub fn votes(&self) -> Vec<PartyVotes> {
        self.parties
            .iter()
            .map(|p| PartyVotes::new(p.id.clone(), p.vote_count))
            .collect()
    }

    /// Coalition analyzer input built from the current seats.
    pub fn profiles(&self) -> Vec<PartyProfile> {
        self.parties
            .iter()
            .map(|p| PartyProfile::new(p.id.clone(), p.seat_count(), p.ideology.clone()))
            .collect()
    }

    /// Run the D'Hondt allocator and record the seats on each party.
    ///
    /// On error the existing seat counts are left untouched.
    pub fn allocate(&mut self, config: &AllocationConfig) -> Result<Allocation, InvalidInputError> {
        let allocation = allocate(&self.votes(), self.total_seats, config)?;
        for (party, result) in self.parties.iter_mut().zip(&allocation.seats) {
            party.set_seat_count(result.seats);
        }
        Ok(allocation)
    }
}
