//! Library powering the recruitment analytics batch engine: synthesizes
//! plausible candidates for a catalog of job requisitions, scores them with a
//! job-weighted five-factor model, simulates skills tests for eligible
//! candidates, and persists each candidate's derivation chain atomically.

pub mod config;
pub mod error;
pub mod export;
pub mod telemetry;
pub mod workflows;
