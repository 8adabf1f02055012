//! Full website analysis.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use webaudit_core::{AnalysisReport, AnalysisRequest, AuditError};

use super::request_url;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let url = request_url(payload)?;

    // A panic inside the analysis still answers with a JSON 500
    let analyzer = Arc::clone(&state.analyzer);
    let report = tokio::spawn(async move { analyzer.analyze(&url).await })
        .await
        .map_err(|e| AuditError::internal(e.to_string()))??;

    Ok(Json(report))
}
