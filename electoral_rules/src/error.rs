//! Error types shared by the allocator and the coalition analyzer.

use thiserror::Error;

use crate::entities::PartyId;

/// Malformed or out-of-range input. Every variant names the party or value
/// that triggered it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("total seats must be greater than zero")]
    ZeroSeats,

    #[error("{requested} seats requested, at most {max} are supported")]
    TooManySeats { requested: u32, max: u32 },

    #[error("party list is empty")]
    EmptyPartyList,

    #[error("party {0} appears more than once")]
    DuplicateParty(PartyId),

    #[error("threshold {0} is outside [0, 1)")]
    ThresholdOutOfRange(f64),

    #[error("every party has zero votes")]
    AllVotesZero,

    #[error("no party reaches the threshold of {threshold}")]
    NoEligibleParties { threshold: f64 },

    #[error("party {0} has no ideology vector")]
    MissingIdeology(PartyId),

    #[error("party {party} has {actual} ideology dimensions, expected {expected}")]
    DimensionMismatch {
        party: PartyId,
        expected: usize,
        actual: usize,
    },

    #[error("party {party} has a non-finite ideology score on dimension {dimension}")]
    NonFiniteIdeology { party: PartyId, dimension: usize },

    #[error("party {party} scores {value} on dimension {dimension}, outside [-10, 10]")]
    IdeologyOutOfRange {
        party: PartyId,
        dimension: usize,
        value: f64,
    },

    #[error("seat counts sum to {actual}, legislature has {expected}")]
    SeatTotalMismatch { expected: u32, actual: u64 },

    #[error("maximum coalition size {0} is below 2")]
    CoalitionSizeTooSmall(usize),

    #[error("{actual} dimension weights given for {expected} dimensions")]
    WeightDimensionMismatch { expected: usize, actual: usize },

    #[error("dimension weight {value} at index {dimension} is negative or non-finite")]
    InvalidWeight { dimension: usize, value: f64 },

    #[error("dimension weights sum to zero")]
    ZeroWeightSum,

    #[error("distance scale {0} must be positive and finite")]
    InvalidDistanceScale(f64),

    #[error("unknown party {0}")]
    UnknownParty(PartyId),
}

/// Failure to load election data or configuration from text or disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    Invalid(#[from] InvalidInputError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names_party() {
        let err = InvalidInputError::DimensionMismatch {
            party: PartyId::new("VVD"),
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "party VVD has 3 ideology dimensions, expected 5"
        );
    }

    #[test]
    fn test_load_error_wraps_invalid_input() {
        let err: LoadError = InvalidInputError::ZeroSeats.into();
        assert!(matches!(err, LoadError::Invalid(InvalidInputError::ZeroSeats)));
    }
}
