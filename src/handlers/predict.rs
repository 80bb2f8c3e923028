//! Fare prediction handler
//!
//! POST /api/predict: the form edge. Values are checked here, once; the
//! orchestrator downstream trusts them.

use crate::handlers::views::FareView;
use crate::handlers::AppState;
use crate::models::RideForm;
use crate::utils::error::{helpers::validation_error, AppResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle a form submission
///
/// Every outcome of the prediction API (fare, ambiguous body, failure) is a
/// 200 with a `FareView`; only invalid form input is rejected with 400.
pub async fn handle_predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RideForm>, JsonRejection>,
) -> AppResult<Json<FareView>> {
    let Json(form) = payload.map_err(|e| validation_error(e.body_text()))?;
    debug!("Received fare form: {:?}", form);

    let input = form.validate().map_err(|e| {
        warn!("Form validation failed: {}", e);
        validation_error(e)
    })?;

    let mut view = FareView::default();
    state
        .orchestrator
        .submit_and_present(&input, form.session_api_url(), &mut view)
        .await;

    Ok(Json(view))
}
