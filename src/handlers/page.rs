//! Form page handler
//!
//! Serves the single-page form. Widget limits and defaults live in the page
//! itself; `/api/predict` checks them again on submission.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
