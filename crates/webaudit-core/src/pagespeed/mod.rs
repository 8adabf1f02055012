//! PageSpeed Insights client.
//!
//! Queries the Lighthouse-backed PageSpeed API for the performance and SEO
//! categories and reduces the response to a [`PageSpeedResult`].

pub mod model;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::AuditConfig;
use crate::error::{error_chain, AuditError, AuditResult, FetchError};
pub use model::{Audit, Category, LighthouseResult, PageSpeedIssues, PageSpeedResponse, PageSpeedResult};

/// Description used when the meta-description audit has nothing to report.
pub const NO_META_DESCRIPTION: &str = "No meta description";

const CATEGORIES: [&str; 2] = ["performance", "seo"];

/// PageSpeed API client.
#[derive(Clone)]
pub struct PageSpeedClient {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl PageSpeedClient {
    pub fn new(config: &AuditConfig) -> AuditResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.pagespeed_timeout)
            .build()
            .map_err(|e| AuditError::Config(format!("failed to build PageSpeed client: {e}")))?;

        Ok(Self {
            endpoint: config.pagespeed_endpoint.clone(),
            api_key: config.pagespeed_api_key.clone(),
            client,
        })
    }

    /// Run a PageSpeed analysis of `url`.
    ///
    /// The URL travels as a form-encoded query parameter, so it is
    /// percent-encoded on the wire.
    pub async fn analyze(&self, url: &str) -> AuditResult<PageSpeedResult> {
        let mut query: Vec<(&str, &str)> = vec![("url", url)];
        if let Some(key) = &self.api_key {
            query.push(("key", key.as_str()));
        }
        query.extend(CATEGORIES.iter().map(|category| ("category", *category)));

        debug!(endpoint = %self.endpoint, url = %url, "Requesting PageSpeed analysis");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(FetchError::classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = upstream_error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            warn!(status = %status, detail = %detail, "PageSpeed API returned an error status");
            return Err(FetchError::Status { status: status.as_u16(), detail }.into());
        }

        let body: PageSpeedResponse = response
            .json()
            .await
            .map_err(|e| AuditError::upstream_schema(error_chain(&e)))?;

        let result = parse_response(body, url)?;
        debug!(
            performance = result.performance,
            seo = result.seo,
            final_url = %result.final_url,
            "PageSpeed analysis complete"
        );
        Ok(result)
    }
}

/// Validate a decoded response and extract the report fields.
pub fn parse_response(
    response: PageSpeedResponse,
    requested_url: &str,
) -> AuditResult<PageSpeedResult> {
    let lighthouse = response
        .lighthouse_result
        .ok_or(AuditError::InvalidPageSpeedResponse)?;

    let performance = category_score(lighthouse.categories.performance.as_ref(), "performance")?;
    let seo = category_score(lighthouse.categories.seo.as_ref(), "seo")?;

    let issues = PageSpeedIssues {
        unused_css_js: audit_failed(lighthouse.audits.unused_css_rules.as_ref()),
        slow_server_response: audit_failed(lighthouse.audits.server_response_time.as_ref()),
    };

    let description = meta_description(&lighthouse);
    let final_url = lighthouse
        .final_url
        .or(lighthouse.final_displayed_url)
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| requested_url.to_string());

    Ok(PageSpeedResult {
        performance,
        seo,
        description,
        final_url,
        issues,
    })
}

/// Convert a 0..1 score to a whole percentage, halves rounding up.
pub fn to_percent(score: f64) -> u32 {
    (score * 100.0).round().clamp(0.0, 100.0) as u32
}

fn category_score(category: Option<&Category>, name: &str) -> AuditResult<u32> {
    category
        .and_then(|c| c.score)
        .map(to_percent)
        .ok_or_else(|| AuditError::upstream_schema(format!("missing {name} score")))
}

/// An audit counts as failed only when it reports a score below perfect.
fn audit_failed(audit: Option<&Audit>) -> bool {
    audit
        .and_then(|a| a.score)
        .is_some_and(|score| score < 1.0)
}

fn meta_description(lighthouse: &LighthouseResult) -> String {
    lighthouse
        .audits
        .meta_description
        .as_ref()
        .and_then(|a| a.details.as_ref())
        .and_then(|d| d.items.first())
        .and_then(|item| item.text())
        .unwrap_or(NO_META_DESCRIPTION)
        .to_string()
}

#[derive(Deserialize)]
struct UpstreamError {
    error: UpstreamErrorBody,
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    message: String,
}

/// Pull `error.message` out of a Google API error payload.
fn upstream_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<UpstreamError>(body)
        .ok()
        .map(|e| e.error.message)
}
