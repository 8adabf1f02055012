//! Metadata-only scrape.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use webaudit_core::metadata::ScrapeOutcome;
use webaudit_core::AnalysisRequest;

use super::request_url;
use crate::error::ApiError;
use crate::state::AppState;

/// Scrape failures are reported in the body with a 200.
pub async fn scrape(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<ScrapeOutcome>, ApiError> {
    let url = request_url(payload)?;
    Ok(Json(state.scraper.scrape(&url).await))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{call, closed_addr, post_json, spawn};
    use crate::state::AppState;
    use crate::{create_router, ServerConfig};
    use axum::{http::StatusCode, response::Html, routing::get, Router};
    use serde_json::json;
    use webaudit_core::AuditConfig;

    fn app() -> Router {
        let state = AppState::from_config(&AuditConfig::default()).unwrap();
        create_router(state, &ServerConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_scrape_success() {
        let site = Router::new().route(
            "/",
            get(|| async {
                Html(r#"<title>Example</title><meta name="description" content="Hello">"#)
            }),
        );
        let url = format!("http://{}/", spawn(site).await);

        let body = json!({ "url": url }).to_string();
        let (status, result) = call(app(), post_json("/api/analyze", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            result,
            json!({
                "status": "Success",
                "url": url,
                "title": "Example",
                "description": "Hello"
            })
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_reported_in_body() {
        let addr = closed_addr().await;

        let body = json!({ "url": format!("http://{addr}/") }).to_string();
        let (status, result) = call(app(), post_json("/api/analyze", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["status"], json!("Failed"));
        assert!(result["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_url_is_bad_request() {
        let (status, error) = call(app(), post_json("/api/analyze", "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, json!({ "error": "URL is required" }));
    }
}
