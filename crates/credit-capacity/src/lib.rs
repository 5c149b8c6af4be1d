//! Mortgage affordability and feasibility scoring for French HCSF underwriting.
//!
//! The `simulation` module holds the pure calculators. `config`, `error` and `telemetry` carry
//! the service plumbing shared with the API binary.

pub mod config;
pub mod error;
pub mod simulation;
pub mod telemetry;
