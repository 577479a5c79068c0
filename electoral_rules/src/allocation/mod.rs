//! D'Hondt seat allocation.
//!
//! The highest-averages method works as follows:
//! 1. **Threshold**: Parties below the vote-share threshold are excluded
//! 2. **Rounds**: For every seat, each eligible party bids `votes / (seats + 1)`
//! 3. **Award**: The largest quotient takes the seat; exact ties go to the
//!    configured [`TieBreak`] rule
//! 4. **Audit**: Every award is recorded together with the first quotient
//!    that missed out

mod quotient;
mod tie_break;

pub use quotient::*;
pub use tie_break::TieBreak;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::entities::{PartyId, PartySeats, PartyVotes};
use crate::error::InvalidInputError;
use tie_break::TieBreaker;

/// Largest legislature the allocator accepts. Every seat is a recorded
/// round, so the audit trail grows with this bound.
pub const MAX_TOTAL_SEATS: u32 = 10_000;

/// Configuration for the allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Minimum share of total valid votes (0.0-1.0, exclusive of 1.0) a party
    /// needs to take part. 0.0 admits every party with at least one vote.
    pub threshold: f64,

    /// Rule for exact quotient ties.
    pub tie_break: TieBreak,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            tie_break: TieBreak::ListOrder,
        }
    }
}

impl AllocationConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if !self.threshold.is_finite() || !(0.0..1.0).contains(&self.threshold) {
            return Err(InvalidInputError::ThresholdOutOfRange(self.threshold));
        }
        Ok(())
    }

    /// Compares the vote share itself, so a party holding exactly the
    /// threshold share (7 of 100 against 0.07) is admitted.
    fn is_eligible(&self, votes: u64, total_votes: u64) -> bool {
        votes > 0 && votes as f64 / total_votes as f64 >= self.threshold
    }
}

/// A single seat award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatAward {
    /// 1-based seat number.
    pub round: u32,
    pub party: PartyId,
    pub quotient: Quotient,
    /// Whether the seat was decided by the tie-break rule.
    pub tie_broken: bool,
}

/// The best quotient left over after the last seat was awarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contender {
    pub party: PartyId,
    pub quotient: Quotient,
}

/// Result of a full allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub total_seats: u32,

    /// Seats per party, in input order.
    pub seats: Vec<PartySeats>,

    /// Every seat award in the order it was made.
    pub rounds: Vec<SeatAward>,

    /// Parties with votes that fell below the threshold.
    pub excluded: Vec<PartyId>,

    /// Who would have won seat `total_seats + 1`.
    pub runner_up: Option<Contender>,
}

impl Allocation {
    /// Seats won by a party.
    pub fn seats_for(&self, party: &PartyId) -> Option<u32> {
        self.seats.iter().find(|s| &s.party == party).map(|s| s.seats)
    }

    /// Seat count per party.
    pub fn seat_map(&self) -> BTreeMap<PartyId, u32> {
        self.seats
            .iter()
            .map(|s| (s.party.clone(), s.seats))
            .collect()
    }

    pub fn seat_total(&self) -> u64 {
        self.seats.iter().map(|s| u64::from(s.seats)).sum()
    }

    /// The award for the final seat.
    pub fn last_award(&self) -> Option<&SeatAward> {
        self.rounds.last()
    }

    /// How many votes-per-seat separated the last seat from the runner-up.
    pub fn seat_margin(&self) -> Option<f64> {
        let last = self.last_award()?;
        let runner_up = self.runner_up.as_ref()?;
        Some(last.quotient.as_f64() - runner_up.quotient.as_f64())
    }

    /// Number of seats decided by the tie-break rule.
    pub fn ties_broken(&self) -> usize {
        self.rounds.iter().filter(|r| r.tie_broken).count()
    }
}

/// Allocate `total_seats` among `parties` with the D'Hondt method.
///
/// Output is a pure function of the input and the configuration: quotients
/// are compared exactly and tie-breaking is deterministic for every
/// [`TieBreak`] rule.
pub fn allocate(
    parties: &[PartyVotes],
    total_seats: u32,
    config: &AllocationConfig,
) -> Result<Allocation, InvalidInputError> {
    validate_input(parties, total_seats, config)?;

    let total_votes: u64 = parties.iter().map(|p| p.votes).sum();
    if total_votes == 0 {
        return Err(InvalidInputError::AllVotesZero);
    }

    let eligible: Vec<bool> = parties
        .iter()
        .map(|p| config.is_eligible(p.votes, total_votes))
        .collect();
    if !eligible.iter().any(|e| *e) {
        return Err(InvalidInputError::NoEligibleParties {
            threshold: config.threshold,
        });
    }

    let excluded: Vec<PartyId> = parties
        .iter()
        .zip(&eligible)
        .filter(|(p, e)| !**e && p.votes > 0)
        .map(|(p, _)| p.party.clone())
        .collect();

    let mut seats = vec![0u32; parties.len()];
    let mut rounds = Vec::with_capacity(total_seats as usize);
    let mut tie_breaker = TieBreaker::new(config.tie_break);
    let threshold = config.threshold;

    for round in 1..=total_seats {
        let (quotient, tied) = highest_quotients(parties, &eligible, &seats)
            .ok_or(InvalidInputError::NoEligibleParties { threshold })?;

        let tie_broken = tied.len() > 1;
        let winner = tie_breaker
            .resolve(&tied, parties)
            .ok_or(InvalidInputError::NoEligibleParties { threshold })?;

        if tie_broken && round == total_seats {
            tracing::warn!(
                round,
                tied = tied.len(),
                winner = %parties[winner].party,
                "final seat decided by tie-break"
            );
        } else if tie_broken {
            tracing::debug!(
                round,
                tied = tied.len(),
                winner = %parties[winner].party,
                "quotient tie broken"
            );
        }

        seats[winner] += 1;
        tracing::trace!(
            round,
            party = %parties[winner].party,
            quotient = quotient.as_f64(),
            "seat awarded"
        );
        rounds.push(SeatAward {
            round,
            party: parties[winner].party.clone(),
            quotient,
            tie_broken,
        });
    }

    let runner_up = highest_quotients(parties, &eligible, &seats).map(|(quotient, tied)| Contender {
        party: parties[tied[0]].party.clone(),
        quotient,
    });

    let allocation = Allocation {
        total_seats,
        seats: parties
            .iter()
            .zip(&seats)
            .map(|(p, s)| PartySeats {
                party: p.party.clone(),
                votes: p.votes,
                seats: *s,
            })
            .collect(),
        rounds,
        excluded,
        runner_up,
    };

    tracing::debug!(
        parties = parties.len(),
        total_seats,
        total_votes,
        excluded = allocation.excluded.len(),
        ties = allocation.ties_broken(),
        "D'Hondt allocation complete"
    );

    Ok(allocation)
}

fn validate_input(
    parties: &[PartyVotes],
    total_seats: u32,
    config: &AllocationConfig,
) -> Result<(), InvalidInputError> {
    if total_seats == 0 {
        return Err(InvalidInputError::ZeroSeats);
    }
    if total_seats > MAX_TOTAL_SEATS {
        return Err(InvalidInputError::TooManySeats {
            requested: total_seats,
            max: MAX_TOTAL_SEATS,
        });
    }
    if parties.is_empty() {
        return Err(InvalidInputError::EmptyPartyList);
    }
    let mut seen = HashSet::with_capacity(parties.len());
    for party in parties {
        if !seen.insert(&party.party) {
            return Err(InvalidInputError::DuplicateParty(party.party.clone()));
        }
    }
    config.validate()
}

/// The largest quotient among eligible parties and every party (ascending
/// list order) that shares it.
fn highest_quotients(
    parties: &[PartyVotes],
    eligible: &[bool],
    seats: &[u32],
) -> Option<(Quotient, Vec<usize>)> {
    let mut best: Option<Quotient> = None;
    let mut tied = Vec::new();

    for (idx, party) in parties.iter().enumerate() {
        if !eligible[idx] {
            continue;
        }
        let quotient = Quotient::for_next_seat(party.votes, seats[idx]);
        match best {
            Some(current) if quotient < current => {}
            Some(current) if quotient == current => tied.push(idx),
            _ => {
                best = Some(quotient);
                tied.clear();
                tied.push(idx);
            }
        }
    }

    best.map(|quotient| (quotient, tied))
}

/// Stateless allocator service holding an [`AllocationConfig`].
#[derive(Debug, Clone, Default)]
pub struct DHondtAllocator {
    config: AllocationConfig,
}

impl DHondtAllocator {
    /// Create a new allocator with the given configuration.
    pub fn new(config: AllocationConfig) -> Self {
        Self { config }
    }

    /// Create an allocator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AllocationConfig::default())
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    pub fn allocate(
        &self,
        parties: &[PartyVotes],
        total_seats: u32,
    ) -> Result<Allocation, InvalidInputError> {
        allocate(parties, total_seats, &self.config)
    }

    /// Allocate and record seats on an election in place.
    pub fn allocate_election(
        &self,
        election: &mut crate::entities::ElectionResult,
    ) -> Result<Allocation, InvalidInputError> {
        election.allocate(&self.config)
    }
}
