//! PageSpeed Insights wire schema and the normalized result.
//!
//! Only the fields the report needs are modelled. Everything is optional so
//! that a single pass in [`super::parse_response`] decides what is missing.

use serde::{Deserialize, Serialize};

/// Top-level `runPagespeed` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedResponse {
    #[serde(default)]
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LighthouseResult {
    #[serde(default)]
    pub final_url: Option<String>,
    #[serde(default)]
    pub final_displayed_url: Option<String>,
    #[serde(default)]
    pub categories: Categories,
    #[serde(default)]
    pub audits: Audits,
}

/// The audits the report reads. Every other audit is skipped unparsed, so
/// their varying `details` shapes never fail the decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Audits {
    #[serde(default, rename = "meta-description")]
    pub meta_description: Option<Audit>,
    #[serde(default, rename = "unused-css-rules")]
    pub unused_css_rules: Option<Audit>,
    #[serde(default, rename = "server-response-time")]
    pub server_response_time: Option<Audit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Categories {
    #[serde(default)]
    pub performance: Option<Category>,
    #[serde(default)]
    pub seo: Option<Category>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Category {
    /// 0.0 to 1.0; null when Lighthouse could not score the category.
    #[serde(default)]
    pub score: Option<f64>,
}

/// A single Lighthouse audit, e.g. `unused-css-rules`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Audit {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub details: Option<AuditDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditDetails {
    #[serde(default)]
    pub items: Vec<AuditItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditItem {
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl AuditItem {
    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().and_then(serde_json::Value::as_str)
    }
}

/// Scores and flags extracted from a PageSpeed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedResult {
    pub performance: u32,
    pub seo: u32,
    pub description: String,
    pub final_url: String,
    pub issues: PageSpeedIssues,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedIssues {
    pub unused_css_js: bool,
    pub slow_server_response: bool,
}
