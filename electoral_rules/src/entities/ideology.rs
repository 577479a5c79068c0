//! Ideology vectors - party positions on fixed policy dimensions.

use serde::{Deserialize, Serialize};

use super::PartyId;
use crate::error::InvalidInputError;

/// Lowest score a party may take on any dimension.
pub const IDEOLOGY_MIN: f64 = -10.0;

/// Highest score a party may take on any dimension.
pub const IDEOLOGY_MAX: f64 = 10.0;

/// The default policy axes, in canonical vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyDimension {
    /// Left (-10) to right (+10).
    Economic,
    /// Progressive (-10) to conservative (+10).
    Social,
    /// Pro-integration (-10) to eurosceptic (+10).
    EuIntegration,
    /// Open (-10) to restrictive (+10).
    Immigration,
    /// Ambitious (-10) to sceptical (+10).
    Climate,
}

impl PolicyDimension {
    /// All default dimensions in vector order.
    pub const ALL: [PolicyDimension; 5] = [
        PolicyDimension::Economic,
        PolicyDimension::Social,
        PolicyDimension::EuIntegration,
        PolicyDimension::Immigration,
        PolicyDimension::Climate,
    ];

    /// Position of this dimension in a default-layout vector.
    pub fn index(self) -> usize {
        match self {
            PolicyDimension::Economic => 0,
            PolicyDimension::Social => 1,
            PolicyDimension::EuIntegration => 2,
            PolicyDimension::Immigration => 3,
            PolicyDimension::Climate => 4,
        }
    }
}

/// Ordered party scores, one per policy dimension.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeologyVector(Vec<f64>);

impl IdeologyVector {
    /// Create a vector with arbitrary dimensionality.
    pub fn new(scores: Vec<f64>) -> Self {
        Self(scores)
    }

    /// Create a vector in the default [`PolicyDimension`] layout.
    pub fn from_dimensions(
        economic: f64,
        social: f64,
        eu_integration: f64,
        immigration: f64,
        climate: f64,
    ) -> Self {
        Self(vec![economic, social, eu_integration, immigration, climate])
    }

    /// Number of dimensions.
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn scores(&self) -> &[f64] {
        &self.0
    }

    /// Score on a named dimension, if the vector uses the default layout.
    pub fn get(&self, dimension: PolicyDimension) -> Option<f64> {
        self.0.get(dimension.index()).copied()
    }

    /// Check that the vector is present, has the expected dimensionality and
    /// holds only finite scores within [`IDEOLOGY_MIN`, `IDEOLOGY_MAX`].
    pub fn validate(&self, party: &PartyId, expected: usize) -> Result<(), InvalidInputError> {
        if self.is_empty() {
            return Err(InvalidInputError::MissingIdeology(party.clone()));
        }
        if self.dimensions() != expected {
            return Err(InvalidInputError::DimensionMismatch {
                party: party.clone(),
                expected,
                actual: self.dimensions(),
            });
        }
        for (dimension, value) in self.0.iter().copied().enumerate() {
            if !value.is_finite() {
                return Err(InvalidInputError::NonFiniteIdeology {
                    party: party.clone(),
                    dimension,
                });
            }
            if !(IDEOLOGY_MIN..=IDEOLOGY_MAX).contains(&value) {
                return Err(InvalidInputError::IdeologyOutOfRange {
                    party: party.clone(),
                    dimension,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<f64>> for IdeologyVector {
    fn from(scores: Vec<f64>) -> Self {
        Self::new(scores)
    }
}
