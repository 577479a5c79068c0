//! Coalition Analyzer - finds and ranks majority coalitions.
//!
//! An analysis runs in four phases:
//! 1. **Validation**: Seats must add up to the legislature and every party
//!    needs an ideology vector of the same dimensionality
//! 2. **Enumeration**: Subsets of 2..=`max_coalition_size` seated parties are
//!    generated depth-first, largest parties first, pruning hopeless branches
//! 3. **Viability**: Only subsets with a strict seat majority are kept
//! 4. **Ranking**: Kept subsets are scored from the compatibility matrix and
//!    sorted by [`rank_order`]

mod candidate;
mod enumeration;

pub use candidate::*;

use electoral_rules::{InvalidInputError, PartyId, PartyProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::AtomicBool;

use crate::compatibility::{
    AggregationPolicy, CompatibilityConfig, CompatibilityMatrix, MIN_SCORE,
};
use crate::error::CoalitionError;
use enumeration::{enumerate_majorities, Limits, Member};

/// Configuration for the coalition analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Largest coalition considered.
    pub max_coalition_size: usize,

    /// Required ideology dimensionality. `None` takes it from the first party.
    pub dimensions: Option<usize>,

    #[serde(flatten)]
    pub compatibility: CompatibilityConfig,

    /// Budget of subsets the enumeration may visit.
    pub max_evaluated_subsets: u64,

    /// Keep only coalitions in which every member is needed for the majority.
    pub minimal_winning_only: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_coalition_size: 4,
            dimensions: None,
            compatibility: CompatibilityConfig::default(),
            max_evaluated_subsets: 1_000_000,
            minimal_winning_only: false,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_max_coalition_size(mut self, size: usize) -> Self {
        self.max_coalition_size = size;
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationPolicy) -> Self {
        self.compatibility.aggregation = aggregation;
        self
    }

    pub fn with_compatibility(mut self, compatibility: CompatibilityConfig) -> Self {
        self.compatibility = compatibility;
        self
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn with_budget(mut self, max_evaluated_subsets: u64) -> Self {
        self.max_evaluated_subsets = max_evaluated_subsets;
        self
    }

    pub fn with_minimal_winning_only(mut self, minimal: bool) -> Self {
        self.minimal_winning_only = minimal;
        self
    }

    /// Validate the parts of the configuration that do not depend on input.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.max_coalition_size < 2 {
            return Err(InvalidInputError::CoalitionSizeTooSmall(self.max_coalition_size));
        }
        self.compatibility.validate(self.dimensions)
    }
}

/// The coalition analyzer. Holds only configuration; every call is pure.
#[derive(Debug, Clone, Default)]
pub struct CoalitionAnalyzer {
    config: AnalyzerConfig,
}

impl CoalitionAnalyzer {
    /// Create a new analyzer with the given configuration.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Create an analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AnalyzerConfig::default())
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Viable coalitions, ranked best first.
    pub fn find_viable_coalitions(
        &self,
        parties: &[PartyProfile],
        total_seats: u32,
    ) -> Result<Vec<CoalitionCandidate>, CoalitionError> {
        Ok(self.run(parties, total_seats, None)?.coalitions)
    }

    /// As [`find_viable_coalitions`](Self::find_viable_coalitions), aborting
    /// with [`CoalitionError::Cancelled`] once `cancel` is set.
    pub fn find_viable_coalitions_with_cancel(
        &self,
        parties: &[PartyProfile],
        total_seats: u32,
        cancel: &AtomicBool,
    ) -> Result<Vec<CoalitionCandidate>, CoalitionError> {
        Ok(self.run(parties, total_seats, Some(cancel))?.coalitions)
    }

    /// Full analysis including the single-party majority flag.
    pub fn analyze(
        &self,
        parties: &[PartyProfile],
        total_seats: u32,
    ) -> Result<CoalitionAnalysis, CoalitionError> {
        self.run(parties, total_seats, None)
    }

    pub fn analyze_with_cancel(
        &self,
        parties: &[PartyProfile],
        total_seats: u32,
        cancel: &AtomicBool,
    ) -> Result<CoalitionAnalysis, CoalitionError> {
        self.run(parties, total_seats, Some(cancel))
    }

    /// Score one proposed coalition, viable or not.
    pub fn evaluate(
        &self,
        parties: &[PartyProfile],
        total_seats: u32,
        members: &[PartyId],
    ) -> Result<CoalitionCandidate, CoalitionError> {
        self.config.validate()?;
        self.validate_ideologies(parties)?;
        validate_seats(parties, total_seats)?;
        if members.len() < 2 {
            return Err(InvalidInputError::CoalitionSizeTooSmall(members.len()).into());
        }

        let mut rows = Vec::with_capacity(members.len());
        let mut seats = 0u32;
        for member in members {
            let row = parties
                .iter()
                .position(|p| &p.party == member)
                .ok_or_else(|| InvalidInputError::UnknownParty(member.clone()))?;
            if rows.contains(&row) {
                return Err(InvalidInputError::DuplicateParty(member.clone()).into());
            }
            rows.push(row);
            seats += parties[row].seats;
        }

        let matrix = CompatibilityMatrix::build(parties, &self.config.compatibility);
        let pair_scores = matrix.pair_scores(&rows);
        let score = self
            .config
            .compatibility
            .aggregation
            .aggregate(&pair_scores)
            .unwrap_or(MIN_SCORE);
        let weakest = AggregationPolicy::WeakestLink
            .aggregate(&pair_scores)
            .unwrap_or(MIN_SCORE);

        Ok(CoalitionCandidate::new(
            members.to_vec(),
            seats,
            score,
            weakest,
            total_seats,
        ))
    }

    /// Pairwise compatibility for all parties, for heat-maps and partner
    /// suggestions. Seat counts are not checked.
    pub fn compatibility_matrix(
        &self,
        parties: &[PartyProfile],
    ) -> Result<CompatibilityMatrix, CoalitionError> {
        self.config.validate()?;
        self.validate_ideologies(parties)?;
        Ok(CompatibilityMatrix::build(parties, &self.config.compatibility))
    }

    fn run(
        &self,
        parties: &[PartyProfile],
        total_seats: u32,
        cancel: Option<&AtomicBool>,
    ) -> Result<CoalitionAnalysis, CoalitionError> {
        self.config.validate()?;
        self.validate_ideologies(parties)?;
        validate_seats(parties, total_seats)?;

        let matrix = CompatibilityMatrix::build(parties, &self.config.compatibility);

        let mut members: Vec<Member> = parties
            .iter()
            .enumerate()
            .filter(|(_, p)| p.seats > 0)
            .map(|(row, p)| Member {
                row,
                seats: p.seats,
            })
            .collect();
        members.sort_by(|a, b| {
            b.seats
                .cmp(&a.seats)
                .then_with(|| parties[a.row].party.cmp(&parties[b.row].party))
        });

        let single_party_majority = members
            .first()
            .filter(|m| u64::from(m.seats) * 2 > u64::from(total_seats))
            .map(|m| parties[m.row].party.clone());

        let limits = Limits {
            max_size: self.config.max_coalition_size,
            max_evaluated: self.config.max_evaluated_subsets,
            minimal_winning_only: self.config.minimal_winning_only,
            cancel,
        };
        let enumeration = enumerate_majorities(&members, total_seats, &limits)?;

        let policy = self.config.compatibility.aggregation;
        let mut seen = HashSet::with_capacity(enumeration.coalitions.len());
        let mut coalitions = Vec::with_capacity(enumeration.coalitions.len());
        for (rows, seats) in &enumeration.coalitions {
            let pair_scores = matrix.pair_scores(rows);
            let (Some(score), Some(weakest)) = (
                policy.aggregate(&pair_scores),
                AggregationPolicy::WeakestLink.aggregate(&pair_scores),
            ) else {
                continue;
            };
            let ids = rows.iter().map(|&row| parties[row].party.clone()).collect();
            let candidate = CoalitionCandidate::new(ids, *seats, score, weakest, total_seats);
            if seen.insert(candidate.canonical_key().to_vec()) {
                tracing::trace!(members = ?candidate.members(), seats, score, "viable coalition");
                coalitions.push(candidate);
            }
        }
        coalitions.sort_by(rank_order);

        tracing::debug!(
            parties = parties.len(),
            total_seats,
            max_size = self.config.max_coalition_size,
            evaluated = enumeration.evaluated,
            viable = coalitions.len(),
            "coalition analysis complete"
        );

        Ok(CoalitionAnalysis {
            total_seats,
            majority_threshold: total_seats / 2 + 1,
            single_party_majority,
            coalitions,
            evaluated_subsets: enumeration.evaluated,
        })
    }

    /// Check the party list and ideology vectors; returns the dimensionality.
    fn validate_ideologies(&self, parties: &[PartyProfile]) -> Result<usize, InvalidInputError> {
        let first = parties.first().ok_or(InvalidInputError::EmptyPartyList)?;

        let mut seen = HashSet::with_capacity(parties.len());
        for profile in parties {
            if !seen.insert(&profile.party) {
                return Err(InvalidInputError::DuplicateParty(profile.party.clone()));
            }
        }

        let expected = match self.config.dimensions {
            Some(dimensions) => dimensions,
            None if first.ideology.is_empty() => {
                return Err(InvalidInputError::MissingIdeology(first.party.clone()))
            }
            None => first.ideology.dimensions(),
        };
        for profile in parties {
            profile.ideology.validate(&profile.party, expected)?;
        }
        self.config.compatibility.validate(Some(expected))?;
        Ok(expected)
    }
}

fn validate_seats(parties: &[PartyProfile], total_seats: u32) -> Result<(), InvalidInputError> {
    if total_seats == 0 {
        return Err(InvalidInputError::ZeroSeats);
    }
    let actual: u64 = parties.iter().map(|p| u64::from(p.seats)).sum();
    if actual != u64::from(total_seats) {
        return Err(InvalidInputError::SeatTotalMismatch {
            expected: total_seats,
            actual,
        });
    }
    Ok(())
}

/// Viable coalitions of up to `max_coalition_size` parties, ranked, using the
/// default analyzer configuration otherwise.
pub fn find_viable_coalitions(
    parties: &[PartyProfile],
    total_seats: u32,
    max_coalition_size: usize,
) -> Result<Vec<CoalitionCandidate>, CoalitionError> {
    CoalitionAnalyzer::new(AnalyzerConfig::default().with_max_coalition_size(max_coalition_size))
        .find_viable_coalitions(parties, total_seats)
}
