//! Votes-to-coalitions pipeline.
//!
//! The engine allocates seats for an election and then analyses which
//! coalitions the new legislature supports.

use electoral_rules::{Allocation, DHondtAllocator, ElectionResult, Party};
use serde::Serialize;
use std::sync::atomic::AtomicBool;

use crate::analyzer::{CoalitionAnalysis, CoalitionAnalyzer};
use crate::config::EngineConfig;
use crate::error::CoalitionError;

/// Seat allocation and coalition analysis of one election.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineReport {
    pub allocation: Allocation,
    pub analysis: CoalitionAnalysis,
}

impl EngineReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Runs the allocator and the coalition analyzer back to back.
#[derive(Debug, Clone)]
pub struct Engine {
    total_seats: u32,
    allocator: DHondtAllocator,
    analyzer: CoalitionAnalyzer,
}

impl Engine {
    pub fn new(total_seats: u32, allocator: DHondtAllocator, analyzer: CoalitionAnalyzer) -> Self {
        Self {
            total_seats,
            allocator,
            analyzer,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.allocation.total_seats,
            config.allocator(),
            config.analyzer(),
        )
    }

    pub fn with_defaults() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn allocator(&self) -> &DHondtAllocator {
        &self.allocator
    }

    pub fn analyzer(&self) -> &CoalitionAnalyzer {
        &self.analyzer
    }

    /// Build an election for the configured legislature size and run it.
    pub fn run_parties(
        &self,
        parties: Vec<Party>,
    ) -> Result<(ElectionResult, EngineReport), CoalitionError> {
        let mut election = ElectionResult {
            total_seats: self.total_seats,
            parties,
        };
        let report = self.run(&mut election)?;
        Ok((election, report))
    }

    /// Allocate seats on `election` in place, then analyse coalitions.
    ///
    /// The election's own `total_seats` is used. If the analysis fails the
    /// allocated seats stay recorded on the election.
    pub fn run(&self, election: &mut ElectionResult) -> Result<EngineReport, CoalitionError> {
        self.run_inner(election, None)
    }

    pub fn run_with_cancel(
        &self,
        election: &mut ElectionResult,
        cancel: &AtomicBool,
    ) -> Result<EngineReport, CoalitionError> {
        self.run_inner(election, Some(cancel))
    }

    fn run_inner(
        &self,
        election: &mut ElectionResult,
        cancel: Option<&AtomicBool>,
    ) -> Result<EngineReport, CoalitionError> {
        if election.total_seats != self.total_seats {
            tracing::debug!(
                election = election.total_seats,
                configured = self.total_seats,
                "election seat count differs from configuration"
            );
        }

        let allocation = self.allocator.allocate_election(election)?;
        let profiles = election.profiles();
        let analysis = match cancel {
            Some(flag) => self
                .analyzer
                .analyze_with_cancel(&profiles, election.total_seats, flag)?,
            None => self.analyzer.analyze(&profiles, election.total_seats)?,
        };

        tracing::info!(
            seats = election.total_seats,
            parties = election.parties.len(),
            coalitions = analysis.coalitions.len(),
            single_party_majority = analysis.single_party_majority.is_some(),
            "election processed"
        );

        Ok(EngineReport {
            allocation,
            analysis,
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
