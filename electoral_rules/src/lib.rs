//! # Electoral Rules
//!
//! Party data model, input validation and the D'Hondt seat allocator.
//! This crate is the single source of truth for vote and seat data and does
//! not contain any coalition logic.
//!
//! ## Core Components
//!
//! - **entities**: Parties, ideology vectors and election results
//! - **allocation**: Highest-averages (D'Hondt) seat allocation
//! - **config**: TOML-backed allocation settings
//! - **error**: Input and load error types

pub mod allocation;
pub mod config;
pub mod entities;
pub mod error;

pub use allocation::*;
pub use config::*;
pub use entities::*;
pub use error::*;
