//! TaxiFare Front Library
//!
//! Collects ride parameters, asks a remote fare-prediction API for an
//! estimate (GET first, POST + JSON on a failing status) and reports the
//! fare, the raw body when no fare can be read, or the failure.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, AppState};
pub use models::{PredictionOutcome, RideForm, RideInput, RidePredictionRequest};
pub use services::{FareApiClient, FareDisplay, FareOrchestrator};
pub use utils::error::{ApiCallError, AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
