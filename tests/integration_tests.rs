//! Integration tests
//!
//! Drive the router end to end, with httpmock standing in for the prediction API

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use serde_json::{json, Value};
use taxifare_front::config::Settings;
use taxifare_front::create_router;
use taxifare_front::middleware::logging::REQUEST_ID_HEADER;
use tower::ServiceExt;

/// Create test app pointing at the given prediction API
fn create_test_app(api_url: &str) -> Router {
    let mut settings = Settings::default();
    settings.api.url = api_url.to_string();
    create_router(settings).expect("Failed to create router")
}

fn default_form() -> Value {
    json!({
        "pickup_date": "2013-07-06",
        "pickup_time": "17:18",
        "passenger_count": 1,
        "pickup_longitude": -73.985428,
        "pickup_latitude": 40.748817,
        "dropoff_longitude": -73.985664,
        "dropoff_latitude": 40.748441
    })
}

fn predict_request(form: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header("content-type", "application/json")
        .body(Body::from(form.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_app("http://127.0.0.1:1/predict");

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "TaxiFare Front");
    assert_eq!(health["details"]["prediction_api"], "http://127.0.0.1:1/predict");
    assert!(health["timestamp"].is_string());
}

#[tokio::test]
async fn test_liveness_check_endpoint() {
    let app = create_test_app("http://127.0.0.1:1/predict");

    let request = Request::builder().uri("/health/live").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "alive");
    assert!(health["details"]["uptime_seconds"].is_number());
}

#[tokio::test]
async fn test_index_serves_form() {
    let app = create_test_app("http://127.0.0.1:1/predict");

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("TaxiFareModel front"));
    assert!(html.contains(r#"id="passenger_count""#));
    assert!(html.contains(r#"min="1" max="8""#));
}

#[tokio::test]
async fn test_index_renders_results_as_text() {
    let app = create_test_app("http://127.0.0.1:1/predict");

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    // Raw API bodies, messages and tips must never be parsed as markup
    assert!(!html.contains("innerHTML"));
    assert!(!html.contains("outerHTML"));
    assert!(!html.contains("insertAdjacentHTML"));
    assert!(html.contains("textContent"));
    assert!(html.contains(r#"el("pre", JSON.stringify(view.raw, null, 2))"#));
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = create_test_app("http://127.0.0.1:1/predict");

    let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert_eq!(error["error"]["type"], "not_found_error");
}

#[tokio::test]
async fn test_predict_success_view() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/predict");
            then.status(200).json_body(json!({"fare_amount": 12.34}));
        })
        .await;
    let app = create_test_app(&server.url("/predict"));

    let response = app.oneshot(predict_request(&default_form())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["kind"], "success");
    assert_eq!(view["fare"], "$12.34");
    assert_eq!(view["message"], "Estimated fare: $12.34");
    assert_eq!(view["points"].as_array().unwrap().len(), 2);
    assert_eq!(view["payload"]["pickup_datetime"], "2013-07-06 17:18:00");
    assert_eq!(view["payload"]["passenger_count"], 1);
}

#[tokio::test]
async fn test_predict_uses_session_api_url() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/predict");
            then.status(200).json_body(json!({"fare": 7}));
        })
        .await;
    let app = create_test_app("http://127.0.0.1:1/predict");

    let mut form = default_form();
    form["api_url"] = json!(server.url("/v2/predict"));
    let response = app.oneshot(predict_request(&form)).await.unwrap();

    mock.assert_async().await;
    let view = body_json(response).await;
    assert_eq!(view["fare"], "$7.00");
}

#[tokio::test]
async fn test_predict_ambiguous_view() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/predict");
            then.status(200).json_body(json!({"unrelated_key": 1}));
        })
        .await;
    let app = create_test_app(&server.url("/predict"));

    let response = app.oneshot(predict_request(&default_form())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["kind"], "warning");
    assert_eq!(view["raw"], json!({"unrelated_key": 1}));
    assert!(view.get("fare").is_none());
}

#[tokio::test]
async fn test_predict_failure_view() {
    let app = create_test_app("http://127.0.0.1:1/predict");

    let response = app.oneshot(predict_request(&default_form())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["kind"], "error");
    assert!(view["message"].as_str().unwrap().starts_with("API call failed:"));
    assert!(view["tip"].as_str().unwrap().contains("/docs"));
    assert!(view.get("fare").is_none());
}

#[tokio::test]
async fn test_predict_rejects_out_of_range_input() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!({"fare": 1}));
        })
        .await;
    let app = create_test_app(&server.url("/predict"));

    let mut form = default_form();
    form["passenger_count"] = json!(9);
    let response = app.oneshot(predict_request(&form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"]["type"], "invalid_request_error");
    assert!(error["error"]["message"].as_str().unwrap().contains("passenger_count"));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_predict_rejects_missing_field() {
    let app = create_test_app("http://127.0.0.1:1/predict");

    let mut form = default_form();
    form.as_object_mut().unwrap().remove("dropoff_latitude");
    let response = app.oneshot(predict_request(&form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert!(error["error"]["message"].as_str().unwrap().contains("dropoff_latitude"));
}
