//! Extraction orchestration
//!
//! Drives the enabled platform adapters, one concurrent task per platform,
//! and forwards fetched programs to the diff engine. One platform's outage
//! never aborts extraction for the others; every platform ends the run with
//! a recorded outcome.

pub mod error;
pub mod orchestrator;
pub mod outcome;

pub use error::{ConfigError, ConfigResult};
pub use orchestrator::Orchestrator;
pub use outcome::{ExtractionSummary, Outcome};

#[cfg(test)]
mod tests;
