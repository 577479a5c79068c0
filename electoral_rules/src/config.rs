//! Allocation settings loaded from the `[allocation]` table of an engine
//! config file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::allocation::{AllocationConfig, TieBreak, MAX_TOTAL_SEATS};
use crate::entities::TWEEDE_KAMER_SEATS;
use crate::error::{InvalidInputError, LoadError};

/// Legislature size plus allocator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationSettings {
    pub total_seats: u32,
    pub threshold: f64,
    pub tie_break: TieBreak,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            total_seats: TWEEDE_KAMER_SEATS,
            threshold: 0.0,
            tie_break: TieBreak::ListOrder,
        }
    }
}

impl AllocationSettings {
    /// Parse settings from a standalone TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, LoadError> {
        let settings: Self = toml::from_str(toml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let toml = std::fs::read_to_string(path)?;
        Self::from_toml_str(&toml)
    }

    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.total_seats == 0 {
            return Err(InvalidInputError::ZeroSeats);
        }
        if self.total_seats > MAX_TOTAL_SEATS {
            return Err(InvalidInputError::TooManySeats {
                requested: self.total_seats,
                max: MAX_TOTAL_SEATS,
            });
        }
        self.allocation_config().validate()
    }

    /// The allocator configuration part of these settings.
    pub fn allocation_config(&self) -> AllocationConfig {
        AllocationConfig {
            threshold: self.threshold,
            tie_break: self.tie_break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tweede_kamer() {
        let settings = AllocationSettings::default();
        assert_eq!(settings.total_seats, 150);
        assert_eq!(settings.threshold, 0.0);
        assert_eq!(settings.tie_break, TieBreak::ListOrder);
    }

    #[test]
    fn test_parse_partial_toml() {
        let settings = AllocationSettings::from_toml_str("threshold = 0.05").unwrap();
        assert_eq!(settings.total_seats, 150);
        assert_eq!(settings.threshold, 0.05);
    }

    #[test]
    fn test_parse_full_toml() {
        let settings = AllocationSettings::from_toml_str(
            r#"
            total_seats = 75
            threshold = 0.0
            tie_break = { lot = { seed = 42 } }
            "#,
        )
        .unwrap();
        assert_eq!(settings.total_seats, 75);
        assert_eq!(settings.allocation_config().tie_break, TieBreak::Lot { seed: 42 });
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(matches!(
            AllocationSettings::from_toml_str("total_seats = 0"),
            Err(LoadError::Invalid(InvalidInputError::ZeroSeats))
        ));
        assert!(matches!(
            AllocationSettings::from_toml_str("total_seats = 4000000000"),
            Err(LoadError::Invalid(InvalidInputError::TooManySeats { .. }))
        ));
        assert!(matches!(
            AllocationSettings::from_toml_str("threshold = 1.5"),
            Err(LoadError::Invalid(InvalidInputError::ThresholdOutOfRange(_)))
        ));
        assert!(matches!(
            AllocationSettings::from_toml_str("total_seats = \"many\""),
            Err(LoadError::Toml(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = AllocationSettings::load("/nonexistent/engine.toml");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
