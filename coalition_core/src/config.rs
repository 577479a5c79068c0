//! Engine configuration: one TOML document with an `[allocation]` and a
//! `[coalition]` table. Either table may be omitted.

use electoral_rules::{AllocationSettings, DHondtAllocator, InvalidInputError, LoadError};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analyzer::{AnalyzerConfig, CoalitionAnalyzer};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub allocation: AllocationSettings,
    pub coalition: AnalyzerConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, LoadError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let toml = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading engine config");
        Self::from_toml_str(&toml)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), InvalidInputError> {
        self.allocation.validate()?;
        self.coalition.validate()
    }

    pub fn allocator(&self) -> DHondtAllocator {
        DHondtAllocator::new(self.allocation.allocation_config())
    }

    pub fn analyzer(&self) -> CoalitionAnalyzer {
        CoalitionAnalyzer::new(self.coalition.clone())
    }
}
