//! Centralized error types for WebAudit.

use std::error::Error as StdError;

use thiserror::Error;

/// Why a single outbound request failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("SSL certificate error: {0}")]
    Tls(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("upstream returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("{0}")]
    Transport(String),
}

impl FetchError {
    /// Sort a client error into a failure kind.
    pub fn classify(err: reqwest::Error) -> Self {
        let detail = error_chain(&err);
        if err.is_timeout() {
            Self::Timeout(detail)
        } else if err.source().is_some_and(is_tls_failure) {
            Self::Tls(detail)
        } else {
            Self::Transport(detail)
        }
    }

    pub fn is_tls(&self) -> bool {
        matches!(self, Self::Tls(_))
    }
}

/// Main error type for WebAudit operations.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid response from PageSpeed API")]
    InvalidPageSpeedResponse,

    #[error("PageSpeed analysis failed: {0}")]
    PageSpeedFetch(#[from] FetchError),

    #[error("PageSpeed analysis failed: {0}")]
    UpstreamSchema(String),

    #[error("Analysis failed: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for WebAudit operations.
pub type AuditResult<T> = Result<T, AuditError>;

impl AuditError {
    pub fn upstream_schema(msg: impl Into<String>) -> Self {
        Self::UpstreamSchema(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True when the caller, not an upstream, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingUrl)
    }
}

/// Render an error followed by each distinct source, `outer: inner: root`.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}

const TLS_MARKERS: [&str; 4] = ["certificate", "ssl", "tls", "handshake"];

/// Walk a source chain looking for a TLS-layer failure.
///
/// Callers pass the first source rather than the client error itself, whose
/// message embeds the request URL.
pub(crate) fn is_tls_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        let text = e.to_string().to_ascii_lowercase();
        if TLS_MARKERS.iter().any(|marker| text.contains(marker)) {
            return true;
        }
        current = e.source();
    }
    false
}
