//! JSON display of a submission
//!
//! `FareView` is what the form page renders: a success banner, a warning
//! with the raw body, or an error with a tip, plus the map points and the
//! payload that was sent.

use crate::models::ride::MapPoint;
use crate::models::RidePredictionRequest;
use crate::services::FareDisplay;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Banner kind shown by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    #[default]
    Idle,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FareView {
    pub kind: ViewKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default)]
    pub points: Vec<MapPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl FareDisplay for FareView {
    fn show_payload(&mut self, request: &RidePredictionRequest) {
        self.payload = serde_json::to_value(request).ok();
    }

    fn show_fare(&mut self, formatted: &str, points: &[MapPoint]) {
        self.kind = ViewKind::Success;
        self.message = format!("Estimated fare: {}", formatted);
        self.fare = Some(formatted.to_string());
        self.points = points.to_vec();
    }

    fn show_ambiguous(&mut self, raw: &Value, points: &[MapPoint]) {
        self.kind = ViewKind::Warning;
        self.message = "The API responded, but the fare could not be found in the JSON.".to_string();
        self.raw = Some(raw.clone());
        self.points = points.to_vec();
    }

    fn show_error(&mut self, message: &str, tip: &str) {
        self.kind = ViewKind::Error;
        self.message = message.to_string();
        self.tip = Some(tip.to_string());
        self.points.clear();
    }
}
