//! HTTP client service
//!
//! Encapsulates HTTP communication with the fare prediction API

use crate::config::{ApiConfig, FallbackPolicy};
use crate::models::RidePredictionRequest;
use crate::utils::error::ApiCallError;
use crate::utils::logging::{truncate_content, MAX_LOGGED_BODY};
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::error::Error as StdError;
use std::time::Duration;
use tracing::{debug, warn};

/// Tagged result of a single HTTP attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// Status below 400
    Success { status: u16, body: String },
    /// Status 400 or above
    ClientError { status: u16, body: String },
    /// The request never produced a status
    TransportError { cause: String },
}

impl AttemptOutcome {
    /// Classify a received status and body
    pub fn from_status(status: u16, body: String) -> Self {
        if status >= 400 {
            AttemptOutcome::ClientError { status, body }
        } else {
            AttemptOutcome::Success { status, body }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AttemptOutcome::Success { status, .. } | AttemptOutcome::ClientError { status, .. } => {
                Some(*status)
            }
            AttemptOutcome::TransportError { .. } => None,
        }
    }

    /// Final interpretation once no further attempt will be made
    pub fn into_body(self) -> Result<Value, ApiCallError> {
        match self {
            AttemptOutcome::Success { body, .. } => {
                serde_json::from_str(&body).map_err(|e| ApiCallError::Decode(e.to_string()))
            }
            AttemptOutcome::ClientError { status, .. } => Err(ApiCallError::Status(status)),
            AttemptOutcome::TransportError { cause } => Err(ApiCallError::Transport(cause)),
        }
    }
}

impl FallbackPolicy {
    /// Whether a first (GET) attempt should be repeated as POST + JSON
    ///
    /// Transport errors are terminal: only an answered request falls back.
    pub fn should_fallback(&self, first: &AttemptOutcome) -> bool {
        match (self, first) {
            (FallbackPolicy::AnyErrorStatus, AttemptOutcome::ClientError { .. }) => true,
            (FallbackPolicy::NotFoundOrMethodNotAllowed, AttemptOutcome::ClientError { status, .. }) => {
                matches!(status, 404 | 405)
            }
            _ => false,
        }
    }
}

/// Fare prediction API client
#[derive(Debug, Clone)]
pub struct FareApiClient {
    client: Client,
    fallback: FallbackPolicy,
    timeout: Duration,
}

impl FareApiClient {
    /// Create a new client instance
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("taxifare-front/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            fallback: config.fallback,
            timeout,
        })
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        self.fallback
    }

    /// GET with the payload as query parameters
    pub async fn get_attempt(&self, url: &str, request: &RidePredictionRequest) -> AttemptOutcome {
        debug!("Sending GET prediction request to {}", url);
        let builder = self.client.get(url).query(&request.query_params()[..]);
        self.send(builder).await
    }

    /// POST with the payload as a JSON body
    pub async fn post_attempt(&self, url: &str, request: &RidePredictionRequest) -> AttemptOutcome {
        debug!("Sending POST prediction request to {}", url);
        let builder = self.client.post(url).json(request);
        self.send(builder).await
    }

    /// GET, fall back to POST when the policy allows, then require success and decode JSON
    pub async fn dispatch(
        &self,
        url: &str,
        request: &RidePredictionRequest,
    ) -> Result<Value, ApiCallError> {
        let first = self.get_attempt(url, request).await;

        let last = if self.fallback.should_fallback(&first) {
            warn!(
                "GET returned status {}, retrying as POST with JSON body",
                first.status().unwrap_or_default()
            );
            self.post_attempt(url, request).await
        } else {
            first
        };

        last.into_body()
    }

    async fn send(&self, builder: RequestBuilder) -> AttemptOutcome {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return self.transport_error(e),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                debug!(
                    "Prediction API answered {}: {}",
                    status,
                    truncate_content(&body, MAX_LOGGED_BODY)
                );
                AttemptOutcome::from_status(status, body)
            }
            Err(e) => self.transport_error(e),
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> AttemptOutcome {
        let cause = if error.is_timeout() {
            format!(
                "request timed out after {}s ({})",
                self.timeout.as_secs(),
                error_chain(&error)
            )
        } else {
            error_chain(&error)
        };

        warn!("Prediction API transport error: {}", cause);
        AttemptOutcome::TransportError { cause }
    }
}

/// Join an error and its sources into one line
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn client_error(status: u16) -> AttemptOutcome {
        AttemptOutcome::from_status(status, String::new())
    }

    #[test]
    fn test_client_creation() {
        let settings = Settings::default();
        let client = FareApiClient::new(&settings.api);
        assert!(client.is_ok());
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(client_error(200), AttemptOutcome::Success { status: 200, .. }));
        assert!(matches!(client_error(302), AttemptOutcome::Success { .. }));
        assert!(matches!(client_error(400), AttemptOutcome::ClientError { status: 400, .. }));
        assert!(matches!(client_error(503), AttemptOutcome::ClientError { status: 503, .. }));
    }

    #[test]
    fn test_any_error_policy_falls_back_on_every_failing_status() {
        let policy = FallbackPolicy::AnyErrorStatus;
        for status in [400, 404, 405, 422, 500, 503] {
            assert!(policy.should_fallback(&client_error(status)), "status {}", status);
        }
        assert!(!policy.should_fallback(&client_error(200)));
    }

    #[test]
    fn test_strict_policy_only_falls_back_on_404_and_405() {
        let policy = FallbackPolicy::NotFoundOrMethodNotAllowed;
        assert!(policy.should_fallback(&client_error(404)));
        assert!(policy.should_fallback(&client_error(405)));
        assert!(!policy.should_fallback(&client_error(422)));
        assert!(!policy.should_fallback(&client_error(500)));
    }

    #[test]
    fn test_transport_errors_never_fall_back() {
        let outcome = AttemptOutcome::TransportError {
            cause: "connection refused".to_string(),
        };
        assert!(!FallbackPolicy::AnyErrorStatus.should_fallback(&outcome));
        assert!(!FallbackPolicy::NotFoundOrMethodNotAllowed.should_fallback(&outcome));
    }

    #[test]
    fn test_into_body() {
        let ok = AttemptOutcome::from_status(200, r#"{"fare": 4.2}"#.to_string());
        assert_eq!(ok.into_body().unwrap()["fare"], 4.2);

        assert_eq!(client_error(500).into_body(), Err(ApiCallError::Status(500)));

        let not_json = AttemptOutcome::from_status(200, "<html>".to_string());
        assert!(matches!(not_json.into_body(), Err(ApiCallError::Decode(_))));
    }
}
