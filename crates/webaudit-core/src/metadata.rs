//! HTML metadata scraper.
//!
//! Fetches a page as-is and reads its `<title>` and meta description,
//! independently of the PageSpeed API.

use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AuditConfig;
use crate::error::{AuditError, AuditResult, FetchError};
use crate::pagespeed::NO_META_DESCRIPTION;

pub const NO_TITLE: &str = "No title found";

/// Title and description read from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

/// Scrape result as returned to clients, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum ScrapeOutcome {
    Success {
        url: String,
        title: String,
        description: String,
    },
    Failed {
        error: String,
    },
}

/// Extract the title and meta description from an HTML document.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let title = first_match(&document, "title")
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let description = first_match(&document, r#"meta[name="description"]"#)
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
        .unwrap_or_else(|| NO_META_DESCRIPTION.to_string());

    PageMetadata { title, description }
}

fn first_match<'a>(document: &'a Html, css: &str) -> Option<scraper::ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Metadata scraper.
#[derive(Clone)]
pub struct MetadataScraper {
    client: reqwest::Client,
}

impl MetadataScraper {
    pub fn new(config: &AuditConfig) -> AuditResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.scrape_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AuditError::Config(format!("failed to build scraper client: {e}")))?;

        Ok(Self { client })
    }

    /// Scrape `url`. Any failure is folded into [`ScrapeOutcome::Failed`].
    pub async fn scrape(&self, url: &str) -> ScrapeOutcome {
        match self.fetch(url).await {
            Ok(metadata) => {
                debug!(url = %url, title = %metadata.title, "Scraped page metadata");
                ScrapeOutcome::Success {
                    url: url.to_string(),
                    title: metadata.title,
                    description: metadata.description,
                }
            }
            Err(err) => {
                warn!(url = %url, error = %err, "Metadata scrape failed");
                ScrapeOutcome::Failed { error: err.to_string() }
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<PageMetadata, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::classify)?;
        let body = response.text().await.map_err(FetchError::classify)?;
        Ok(extract_metadata(&body))
    }
}
