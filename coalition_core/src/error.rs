//! Coalition analysis errors.

use electoral_rules::InvalidInputError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoalitionError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The enumeration visited more subsets than the configured budget.
    /// Retry with a smaller `max_coalition_size` or a larger budget.
    #[error("enumeration visited {evaluated} subsets, over the limit of {limit}")]
    ComputationLimitExceeded { evaluated: u64, limit: u64 },

    #[error("enumeration cancelled after {evaluated} subsets")]
    Cancelled { evaluated: u64 },
}
