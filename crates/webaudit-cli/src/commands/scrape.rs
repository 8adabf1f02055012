//! One-shot metadata scrape.

use anyhow::Result;
use clap::Args;
use webaudit_core::metadata::MetadataScraper;
use webaudit_core::AuditConfig;

#[derive(Args)]
pub struct ScrapeArgs {
    /// Page URL, including its scheme
    pub url: String,
}

pub async fn execute(args: ScrapeArgs, config: AuditConfig) -> Result<()> {
    let scraper = MetadataScraper::new(&config)?;
    let outcome = scraper.scrape(&args.url).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
