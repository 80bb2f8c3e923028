//! Prediction result models
//!
//! Fare key probing over the API's JSON body and the three terminal
//! outcomes of a submission.

use super::ride::MapPoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response keys that may carry the fare, highest priority first
pub const FARE_KEYS: [&str; 4] = ["fare_amount", "fare", "prediction", "pred"];

/// Remediation hint shown next to every API failure
pub const FAILURE_TIP: &str =
    "Tip: open your API's /docs to confirm the method (GET vs POST) and parameter names.";

/// Result of probing a response body for a fare
#[derive(Debug, Clone, PartialEq)]
pub enum FareExtraction {
    /// A fare key was found and its value coerced to a float
    Found { key: &'static str, fare: f64 },
    /// A fare key was found but its value is not a number
    Unusable { key: &'static str },
    /// No fare key in the body
    Missing,
}

/// Probe `FARE_KEYS` in order; the first key present decides the outcome
pub fn extract_fare(body: &Value) -> FareExtraction {
    let Some(object) = body.as_object() else {
        return FareExtraction::Missing;
    };

    for key in FARE_KEYS {
        if let Some(value) = object.get(key) {
            return match coerce_fare(value) {
                Some(fare) => FareExtraction::Found { key, fare },
                None => FareExtraction::Unusable { key },
            };
        }
    }

    FareExtraction::Missing
}

fn coerce_fare(value: &Value) -> Option<f64> {
    let fare = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    fare.filter(|fare| fare.is_finite())
}

/// Currency display with two decimals, e.g. `$12.34`
pub fn format_fare(fare: f64) -> String {
    format!("${:.2}", fare)
}

/// Terminal outcome of one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PredictionOutcome {
    /// The API answered with a recognisable fare
    Success {
        fare: f64,
        formatted: String,
        points: Vec<MapPoint>,
    },
    /// The API answered successfully but no fare could be read from the body
    AmbiguousResponse { raw: Value, points: Vec<MapPoint> },
    /// Transport error, failing status after the fallback, or undecodable body
    Failure { message: String, tip: String },
}

impl PredictionOutcome {
    /// Interpret a successfully decoded body
    pub fn from_body(body: Value, points: Vec<MapPoint>) -> Self {
        match extract_fare(&body) {
            FareExtraction::Found { fare, .. } => PredictionOutcome::Success {
                fare,
                formatted: format_fare(fare),
                points,
            },
            FareExtraction::Unusable { .. } | FareExtraction::Missing => {
                PredictionOutcome::AmbiguousResponse { raw: body, points }
            }
        }
    }

    /// Failure carrying the standard tip
    pub fn failure(cause: impl std::fmt::Display) -> Self {
        PredictionOutcome::Failure {
            message: format!("API call failed: {}", cause),
            tip: FAILURE_TIP.to_string(),
        }
    }

    /// Formatted fare, only for `Success`
    pub fn formatted_fare(&self) -> Option<&str> {
        match self {
            PredictionOutcome::Success { formatted, .. } => Some(formatted),
            _ => None,
        }
    }
}
