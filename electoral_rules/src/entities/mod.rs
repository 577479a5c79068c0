//! Entity definitions for elections: parties, ideology and results.

mod election;
mod ideology;
mod party;

pub use election::*;
pub use ideology::*;
pub use party::*;

use serde::{Deserialize, Serialize};

/// Stable unique identifier for a party (e.g. its list abbreviation).
///
/// Ordered so a coalition can be reduced to a canonical sorted member tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(pub String);

impl PartyId {
    /// Create a party ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PartyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PartyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
