//! Service layer module
//!
//! Contains the prediction API client and the fare request orchestrator

pub mod client;
pub mod orchestrator;

pub use client::{AttemptOutcome, FareApiClient};
pub use orchestrator::{present, FareDisplay, FareOrchestrator};
