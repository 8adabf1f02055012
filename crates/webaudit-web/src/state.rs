//! Application state.

use std::sync::Arc;

use webaudit_core::metadata::MetadataScraper;
use webaudit_core::{Analyzer, AuditConfig, AuditResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub scraper: MetadataScraper,
}

impl AppState {
    pub fn new(analyzer: Analyzer, scraper: MetadataScraper) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            scraper,
        }
    }

    pub fn from_config(config: &AuditConfig) -> AuditResult<Self> {
        Ok(Self::new(
            Analyzer::from_config(config)?,
            MetadataScraper::new(config)?,
        ))
    }
}
