//! WebAudit Core Library
//!
//! Page-speed scoring, security header checks, metadata scraping and the
//! aggregation that folds them into a single website report.

pub mod config;
pub mod error;
pub mod metadata;
pub mod pagespeed;
pub mod report;
pub mod security;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::AuditConfig;
pub use error::{AuditError, AuditResult, FetchError};
pub use report::{AnalysisReport, AnalysisRequest, Analyzer};
