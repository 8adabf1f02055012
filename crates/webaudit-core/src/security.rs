//! HTTP security header checks.
//!
//! One GET against the target, following redirects with certificate
//! verification on. Failures are reported as issue strings, never as errors.

use reqwest::header::HeaderMap;
use reqwest::Url;
use tracing::{debug, warn};

use crate::config::AuditConfig;
use crate::error::{AuditError, AuditResult, FetchError};

pub const HTTPS_NOT_ENFORCED: &str = "Does not enforce HTTPS";
pub const SSL_CERTIFICATE_ERROR: &str = "SSL certificate error";

/// Headers every response should carry, with the issue reported when absent.
const REQUIRED_HEADERS: [(&str, &str); 3] = [
    ("strict-transport-security", "Missing HSTS header"),
    ("content-security-policy", "Missing CSP header"),
    ("x-content-type-options", "Missing X-Content-Type-Options header"),
];

/// Prefix `https://` unless the URL already names an http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// List the protections missing from a fetched response.
pub fn inspect_response(final_url: &Url, headers: &HeaderMap) -> Vec<String> {
    let mut issues = Vec::new();

    if final_url.scheme() != "https" {
        issues.push(HTTPS_NOT_ENFORCED.to_string());
    }

    for (header, message) in REQUIRED_HEADERS {
        if !headers.contains_key(header) {
            issues.push(message.to_string());
        }
    }

    issues
}

/// The issue entry recorded when the probe itself fails.
pub fn failure_issue(err: &FetchError) -> String {
    if err.is_tls() {
        SSL_CERTIFICATE_ERROR.to_string()
    } else {
        format!("Security check failed: {err}")
    }
}

/// Security header checker.
#[derive(Clone)]
pub struct SecurityChecker {
    client: reqwest::Client,
}

impl SecurityChecker {
    pub fn new(config: &AuditConfig) -> AuditResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.security_timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| AuditError::Config(format!("failed to build security client: {e}")))?;

        Ok(Self { client })
    }

    /// Check `url` and return its issues; empty means nothing was found.
    pub async fn check(&self, url: &str) -> Vec<String> {
        let target = normalize_url(url);
        match self.probe(&target).await {
            Ok(issues) => {
                debug!(url = %target, issues = issues.len(), "Security check complete");
                issues
            }
            Err(err) => {
                warn!(url = %target, error = %err, "Security check failed");
                vec![failure_issue(&err)]
            }
        }
    }

    async fn probe(&self, target: &str) -> Result<Vec<String>, FetchError> {
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(FetchError::classify)?;

        Ok(inspect_response(response.url(), response.headers()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use axum::{http::header, response::Redirect, routing::get, Router};
    use reqwest::header::HeaderValue;

    fn https() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    fn secure_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Strict-Transport-Security", HeaderValue::from_static("max-age=63072000"));
        headers.insert("Content-Security-Policy", HeaderValue::from_static("default-src 'self'"));
        headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
        headers
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  example.com/path "), "https://example.com/path");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("HTTPS://Example.com"), "HTTPS://Example.com");
    }

    #[test]
    fn test_all_headers_present_over_https() {
        assert!(inspect_response(&https(), &secure_headers()).is_empty());
    }

    #[test]
    fn test_missing_headers_over_https() {
        let issues = inspect_response(&https(), &HeaderMap::new());
        assert_eq!(
            issues,
            vec![
                "Missing HSTS header",
                "Missing CSP header",
                "Missing X-Content-Type-Options header",
            ]
        );
    }

    #[test]
    fn test_plain_http_is_flagged_first() {
        let url = Url::parse("http://example.com/").unwrap();
        let issues = inspect_response(&url, &secure_headers());
        assert_eq!(issues, vec![HTTPS_NOT_ENFORCED]);
    }

    #[test]
    fn test_failure_issue() {
        let tls = FetchError::Tls("certificate verify failed".to_string());
        assert_eq!(failure_issue(&tls), SSL_CERTIFICATE_ERROR);

        let timeout = FetchError::Timeout("operation timed out".to_string());
        assert_eq!(
            failure_issue(&timeout),
            "Security check failed: request timed out: operation timed out"
        );
    }

    #[tokio::test]
    async fn test_check_follows_redirects() {
        let router = Router::new()
            .route("/", get(|| async { Redirect::permanent("/home") }))
            .route(
                "/home",
                get(|| async {
                    (
                        [
                            (header::STRICT_TRANSPORT_SECURITY, "max-age=600"),
                            (header::CONTENT_SECURITY_POLICY, "default-src 'self'"),
                            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
                        ],
                        "home",
                    )
                }),
            );
        let addr = test_support::spawn(router).await;

        let checker = SecurityChecker::new(&AuditConfig::default()).unwrap();
        let issues = checker.check(&format!("http://{addr}/")).await;
        assert_eq!(issues, vec![HTTPS_NOT_ENFORCED]);
    }

    #[tokio::test]
    async fn test_check_unreachable_host_never_errors() {
        let addr = test_support::closed_addr().await;
        let checker = SecurityChecker::new(&AuditConfig::default()).unwrap();
        let issues = checker.check(&format!("http://{addr}/")).await;
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("Security check failed: "));
    }
}
