//! # Coalition Core
//!
//! Coalition analysis on top of `electoral_rules`. Given allocated seats and
//! party ideology vectors, this crate scores how well parties fit together and
//! finds every coalition that commands a strict majority.
//!
//! ## Core Components
//!
//! - **compatibility**: Pairwise scores from weighted ideological distance
//! - **analyzer**: Pruned coalition enumeration, viability filter and ranking
//! - **engine**: Votes-to-coalitions pipeline driven by an [`EngineConfig`]
//!
//! ## Design Philosophy
//!
//! - **Pure**: No I/O and no shared state; every call takes plain data and
//!   returns new values
//! - **Bounded**: Enumeration is capped by a subset budget and can be
//!   cancelled cooperatively
//! - **Deterministic**: Ranking is a total order, so equal input yields equal
//!   output

pub mod analyzer;
pub mod compatibility;
pub mod config;
pub mod engine;
pub mod error;

pub use analyzer::*;
pub use compatibility::*;
pub use config::*;
pub use engine::*;
pub use error::*;
