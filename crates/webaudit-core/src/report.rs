//! Website report aggregation.
//!
//! Runs the PageSpeed analysis and then the security check, one after the
//! other, and folds both into an [`AnalysisReport`]. A PageSpeed failure
//! aborts the analysis before the security check is attempted.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AuditConfig;
use crate::error::{AuditError, AuditResult};
use crate::pagespeed::{PageSpeedClient, PageSpeedIssues, PageSpeedResult};
use crate::security::SecurityChecker;

/// Generic advice attached to every successful report.
pub const RECOMMENDATIONS: [&str; 3] = [
    "Minify CSS/JS files",
    "Optimize server response times",
    "Implement proper security headers",
];

pub const UNUSED_CSS_JS: &str = "Unused CSS/JS";
pub const SLOW_SERVER_RESPONSE: &str = "Slow server response";
pub const NO_DESCRIPTION: &str = "No description available";

/// Security score when no issue was found.
pub const SECURITY_SCORE_CLEAN: u32 = 100;
/// Security score when at least one issue was found.
pub const SECURITY_SCORE_FLAGGED: u32 = 50;

/// Request body shared by both analyze endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl AnalysisRequest {
    /// The requested URL, or [`AuditError::MissingUrl`] when absent or blank.
    pub fn url(&self) -> AuditResult<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(AuditError::MissingUrl)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub performance: u32,
    pub seo: u32,
    pub security: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub critical: Vec<String>,
    /// Never populated.
    pub warnings: Vec<String>,
}

/// Aggregated website report.
///
/// `title` carries the resolved URL reported by PageSpeed, not the page's
/// HTML title; `final_url` exposes the same value under its real name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub url: String,
    pub title: String,
    pub final_url: String,
    pub description: String,
    pub scores: Scores,
    pub issues: IssueSummary,
    pub security_issues: Vec<String>,
    pub recommendations: Vec<String>,
}

pub fn security_score(security_issues: &[String]) -> u32 {
    if security_issues.is_empty() {
        SECURITY_SCORE_CLEAN
    } else {
        SECURITY_SCORE_FLAGGED
    }
}

pub fn critical_issues(issues: &PageSpeedIssues) -> Vec<String> {
    [
        issues.unused_css_js.then_some(UNUSED_CSS_JS),
        issues.slow_server_response.then_some(SLOW_SERVER_RESPONSE),
    ]
    .into_iter()
    .flatten()
    .map(str::to_string)
    .collect()
}

/// Combine a PageSpeed result and security findings into a report.
pub fn build_report(
    url: &str,
    pagespeed: &PageSpeedResult,
    security_issues: Vec<String>,
) -> AnalysisReport {
    let title = if pagespeed.final_url.is_empty() {
        url.to_string()
    } else {
        pagespeed.final_url.clone()
    };
    let description = if pagespeed.description.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        pagespeed.description.clone()
    };

    AnalysisReport {
        url: url.to_string(),
        final_url: title.clone(),
        title,
        description,
        scores: Scores {
            performance: pagespeed.performance,
            seo: pagespeed.seo,
            security: security_score(&security_issues),
        },
        issues: IssueSummary {
            critical: critical_issues(&pagespeed.issues),
            warnings: Vec::new(),
        },
        security_issues,
        recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
    }
}

/// Runs both checks for a URL and aggregates the results.
#[derive(Clone)]
pub struct Analyzer {
    pagespeed: PageSpeedClient,
    security: SecurityChecker,
}

impl Analyzer {
    pub fn new(pagespeed: PageSpeedClient, security: SecurityChecker) -> Self {
        Self { pagespeed, security }
    }

    pub fn from_config(config: &AuditConfig) -> AuditResult<Self> {
        Ok(Self::new(
            PageSpeedClient::new(config)?,
            SecurityChecker::new(config)?,
        ))
    }

    /// Analyze `url` end to end.
    pub async fn analyze(&self, url: &str) -> AuditResult<AnalysisReport> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AuditError::MissingUrl);
        }

        let pagespeed = self.pagespeed.analyze(url).await.inspect_err(|e| {
            warn!(url = %url, error = %e, "PageSpeed analysis failed, aborting");
        })?;

        let security_issues = self.security.check(url).await;
        let report = build_report(url, &pagespeed, security_issues);

        info!(
            url = %url,
            performance = report.scores.performance,
            seo = report.scores.seo,
            security = report.scores.security,
            critical = report.issues.critical.len(),
            "Analysis complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use axum::{routing::get, Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn pagespeed_result(issues: PageSpeedIssues) -> PageSpeedResult {
        PageSpeedResult {
            performance: 87,
            seo: 92,
            description: "An example page".to_string(),
            final_url: "https://example.com/".to_string(),
            issues,
        }
    }

    #[test]
    fn test_request_url_validation() {
        let missing = AnalysisRequest::default();
        assert!(matches!(missing.url(), Err(AuditError::MissingUrl)));

        let blank = AnalysisRequest { url: Some("  ".to_string()) };
        assert!(matches!(blank.url(), Err(AuditError::MissingUrl)));

        let given = AnalysisRequest { url: Some(" example.com ".to_string()) };
        assert_eq!(given.url().unwrap(), "example.com");
    }

    #[test]
    fn test_build_report_clean_security() {
        let report = build_report("example.com", &pagespeed_result(PageSpeedIssues::default()), vec![]);
        assert_eq!(report.url, "example.com");
        assert_eq!(report.title, "https://example.com/");
        assert_eq!(report.final_url, "https://example.com/");
        assert_eq!(report.description, "An example page");
        assert_eq!(report.scores, Scores { performance: 87, seo: 92, security: 100 });
        assert!(report.issues.critical.is_empty());
        assert!(report.issues.warnings.is_empty());
        assert_eq!(report.recommendations, RECOMMENDATIONS);
    }

    #[test]
    fn test_build_report_flags() {
        let issues = PageSpeedIssues { unused_css_js: true, slow_server_response: true };
        let security = vec!["Missing CSP header".to_string()];
        let report = build_report("example.com", &pagespeed_result(issues), security.clone());
        assert_eq!(report.scores.security, 50);
        assert_eq!(report.security_issues, security);
        assert_eq!(report.issues.critical, vec![UNUSED_CSS_JS, SLOW_SERVER_RESPONSE]);

        let issues = PageSpeedIssues { unused_css_js: false, slow_server_response: true };
        assert_eq!(critical_issues(&issues), vec![SLOW_SERVER_RESPONSE]);
    }

    #[test]
    fn test_build_report_fallbacks() {
        let mut result = pagespeed_result(PageSpeedIssues::default());
        result.final_url.clear();
        result.description.clear();
        let report = build_report("example.com", &result, vec![]);
        assert_eq!(report.title, "example.com");
        assert_eq!(report.description, NO_DESCRIPTION);
    }

    #[test]
    fn test_report_wire_shape() {
        let report = build_report("example.com", &pagespeed_result(PageSpeedIssues::default()), vec![]);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["scores"]["security"], json!(100));
        assert_eq!(value["issues"]["warnings"], json!([]));
        assert_eq!(value["security_issues"], json!([]));
        assert_eq!(value["recommendations"].as_array().unwrap().len(), 3);
    }

    fn lighthouse_body() -> serde_json::Value {
        json!({
            "lighthouseResult": {
                "finalUrl": "https://example.com/",
                "categories": {
                    "performance": { "score": 0.5 },
                    "seo": { "score": 1.0 }
                },
                "audits": {
                    "server-response-time": { "score": 0 }
                }
            }
        })
    }

    async fn analyzer_with(pagespeed_body: serde_json::Value) -> (Analyzer, String, Arc<AtomicUsize>) {
        let pagespeed = Router::new().route(
            "/runPagespeed",
            get(move || {
                let body = pagespeed_body.clone();
                async move { Json(body) }
            }),
        );
        let pagespeed_addr = test_support::spawn(pagespeed).await;

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let site = Router::new().route(
            "/",
            get(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { "<html></html>" }
            }),
        );
        let site_addr = test_support::spawn(site).await;

        let config = AuditConfig::default().with_endpoint(format!("http://{pagespeed_addr}/runPagespeed"));
        let analyzer = Analyzer::from_config(&config).unwrap();
        (analyzer, format!("http://{site_addr}/"), hits)
    }

    #[tokio::test]
    async fn test_analyze_end_to_end() {
        let (analyzer, site, hits) = analyzer_with(lighthouse_body()).await;

        let report = analyzer.analyze(&site).await.unwrap();
        assert_eq!(report.url, site);
        assert_eq!(report.scores, Scores { performance: 50, seo: 100, security: 50 });
        assert_eq!(report.issues.critical, vec![SLOW_SERVER_RESPONSE]);
        assert_eq!(
            report.security_issues,
            vec![
                "Does not enforce HTTPS",
                "Missing HSTS header",
                "Missing CSP header",
                "Missing X-Content-Type-Options header",
            ]
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pagespeed_failure_skips_security_check() {
        let (analyzer, site, hits) = analyzer_with(json!({ "kind": "pagespeedonline#result" })).await;

        let err = analyzer.analyze(&site).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid response from PageSpeed API");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyze_blank_url() {
        let analyzer = Analyzer::from_config(&AuditConfig::default()).unwrap();
        let err = analyzer.analyze("   ").await.unwrap_err();
        assert!(err.is_client_error());
    }
}
