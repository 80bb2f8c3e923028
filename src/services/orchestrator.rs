//! Fare request orchestration
//!
//! Drives one submission: payload construction, dispatch through the
//! GET/POST fallback and interpretation of the answer, ending in one
//! terminal `PredictionOutcome` handed to a `FareDisplay`.

use crate::config::Settings;
use crate::models::{PredictionOutcome, RideInput, RidePredictionRequest};
use crate::models::ride::MapPoint;
use crate::services::client::FareApiClient;
use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Presentation side of a submission
pub trait FareDisplay {
    /// Echo of the payload actually sent
    fn show_payload(&mut self, request: &RidePredictionRequest);

    /// Formatted fare plus the two map points
    fn show_fare(&mut self, formatted: &str, points: &[MapPoint]);

    /// The API answered but no fare could be read; the raw body is shown instead
    fn show_ambiguous(&mut self, raw: &Value, points: &[MapPoint]);

    fn show_error(&mut self, message: &str, tip: &str);
}

/// Route an outcome to the matching display call
pub fn present<D: FareDisplay + ?Sized>(outcome: &PredictionOutcome, display: &mut D) {
    match outcome {
        PredictionOutcome::Success {
            formatted, points, ..
        } => display.show_fare(formatted, points),
        PredictionOutcome::AmbiguousResponse { raw, points } => display.show_ambiguous(raw, points),
        PredictionOutcome::Failure { message, tip } => display.show_error(message, tip),
    }
}

/// Fare request orchestrator
#[derive(Debug, Clone)]
pub struct FareOrchestrator {
    client: FareApiClient,
    default_url: String,
}

impl FareOrchestrator {
    /// Create an orchestrator from settings
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: FareApiClient::new(&settings.api)?,
            default_url: settings.api.url.clone(),
        })
    }

    /// Run one submission end to end
    ///
    /// Never fails: transport errors, failing statuses and undecodable
    /// bodies all become `PredictionOutcome::Failure`.
    pub async fn submit(&self, input: &RideInput, api_url: Option<&str>) -> PredictionOutcome {
        let request = RidePredictionRequest::from_input(input);
        self.submit_request(&request, api_url).await
    }

    /// Run one submission and hand every step to `display`
    pub async fn submit_and_present<D: FareDisplay + ?Sized>(
        &self,
        input: &RideInput,
        api_url: Option<&str>,
        display: &mut D,
    ) -> PredictionOutcome {
        let request = RidePredictionRequest::from_input(input);
        display.show_payload(&request);

        let outcome = self.submit_request(&request, api_url).await;
        present(&outcome, display);
        outcome
    }

    /// Same as `submit` for an already built request
    pub async fn submit_request(
        &self,
        request: &RidePredictionRequest,
        api_url: Option<&str>,
    ) -> PredictionOutcome {
        let url = match api_url.map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => self.default_url.as_str(),
        };

        if let Ok(payload) = serde_json::to_string(request) {
            debug!("Request payload: {}", payload);
        }
        info!(
            "Requesting fare prediction from {} (fallback policy: {:?})",
            url,
            self.client.fallback_policy()
        );

        let outcome = match self.client.dispatch(url, request).await {
            Ok(body) => PredictionOutcome::from_body(body, request.map_points().to_vec()),
            Err(e) => PredictionOutcome::failure(e),
        };

        match &outcome {
            PredictionOutcome::Success { formatted, .. } => info!("Estimated fare: {}", formatted),
            PredictionOutcome::AmbiguousResponse { raw, .. } => {
                warn!("Prediction API responded without a recognised fare key: {}", raw)
            }
            PredictionOutcome::Failure { message, .. } => warn!("{}", message),
        }

        outcome
    }
}
