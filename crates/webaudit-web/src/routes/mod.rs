//! Route handlers.

pub mod analyze;
pub mod metadata;

use axum::{extract::rejection::JsonRejection, Json};
use tracing::debug;
use webaudit_core::{AnalysisRequest, AuditError};

/// Pull the URL out of a request body. Unreadable bodies count as missing.
pub(crate) fn request_url(
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<String, AuditError> {
    match payload {
        Ok(Json(request)) => request.url().map(str::to_string),
        Err(rejection) => {
            debug!(%rejection, "Rejected request body");
            Err(AuditError::MissingUrl)
        }
    }
}
