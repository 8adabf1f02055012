//! Runtime configuration for the outbound checks.

use std::time::Duration;

use crate::error::{AuditError, AuditResult};

/// Public PageSpeed Insights v5 endpoint.
pub const DEFAULT_PAGESPEED_URL: &str =
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Upper bound for a single PageSpeed call.
pub const PAGESPEED_TIMEOUT: Duration = Duration::from_secs(15);

/// Upper bound for the security header probe.
pub const SECURITY_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding the PageSpeed API credential.
pub const API_KEY_VAR: &str = "PAGESPEED_API_KEY";

/// Environment variable overriding the PageSpeed endpoint.
pub const API_URL_VAR: &str = "PAGESPEED_API_URL";

/// Read-only settings shared by every checker, built once at startup.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub pagespeed_endpoint: String,
    pub pagespeed_api_key: Option<String>,
    pub pagespeed_timeout: Duration,
    pub security_timeout: Duration,
    /// `None` leaves the metadata scrape unbounded.
    pub scrape_timeout: Option<Duration>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            pagespeed_endpoint: DEFAULT_PAGESPEED_URL.to_string(),
            pagespeed_api_key: None,
            pagespeed_timeout: PAGESPEED_TIMEOUT,
            security_timeout: SECURITY_TIMEOUT,
            scrape_timeout: None,
        }
    }
}

impl AuditConfig {
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.pagespeed_api_key = non_empty(key);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.pagespeed_endpoint = endpoint.into().trim().to_string();
        self
    }

    /// Reject settings no request could succeed with.
    pub fn validate(&self) -> AuditResult<()> {
        let endpoint = self.pagespeed_endpoint.to_ascii_lowercase();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(AuditError::Config(format!(
                "PageSpeed endpoint must be an http(s) URL, got '{}'",
                self.pagespeed_endpoint
            )));
        }
        if self.pagespeed_timeout.is_zero() || self.security_timeout.is_zero() {
            return Err(AuditError::Config("timeouts must be non-zero".to_string()));
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
