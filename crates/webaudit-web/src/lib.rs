//! WebAudit Web Server
//!
//! Axum-based HTTP front for the website analysis checks.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::post,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;
use webaudit_core::{AuditConfig, AuditError, AuditResult};

pub use config::ServerConfig;
use state::AppState;

/// Create the application router.
///
/// `/analyze` only answers cross-origin requests from the configured
/// frontend origin; every other route allows any origin.
pub fn create_router(state: AppState, config: &ServerConfig) -> AuditResult<Router> {
    let origin = HeaderValue::from_str(&config.cors_origin)
        .map_err(|_| AuditError::Config(format!("invalid CORS origin '{}'", config.cors_origin)))?;

    let frontend_cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let open_cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let analyze_routes = Router::new()
        .route("/analyze", post(routes::analyze::analyze))
        .layer(frontend_cors);

    // Metadata-only scrape, kept apart from the full analysis
    let api_routes = Router::new()
        .route("/analyze", post(routes::metadata::scrape))
        .layer(open_cors);

    Ok(Router::new()
        .merge(analyze_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Run the web server.
pub async fn run_server(audit: AuditConfig, server: ServerConfig) -> anyhow::Result<()> {
    audit.validate()?;
    if audit.pagespeed_api_key.is_none() {
        warn!("No PageSpeed API key configured, requests will be sent without one");
    }

    let state = AppState::from_config(&audit)?;
    let app = create_router(state, &server)?;

    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
