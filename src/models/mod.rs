//! Data models module
//!
//! Defines the ride request sent to the prediction API and the outcomes read back from it

pub mod prediction;
pub mod ride;

pub use prediction::{extract_fare, format_fare, FareExtraction, PredictionOutcome, FARE_KEYS};
pub use ride::{MapPoint, RideForm, RideInput, RidePredictionRequest};
