//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use webaudit_core::config::{API_KEY_VAR, API_URL_VAR, DEFAULT_PAGESPEED_URL};
use webaudit_core::AuditConfig;

pub mod analyze;
pub mod scrape;
pub mod serve;

/// WebAudit - website performance, SEO and security analysis
#[derive(Parser)]
#[command(name = "webaudit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// PageSpeed API key
    #[arg(long, global = true, env = API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// PageSpeed endpoint
    #[arg(long, global = true, env = API_URL_VAR, default_value = DEFAULT_PAGESPEED_URL)]
    pub pagespeed_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),

    /// Analyze a website once and print the report
    Analyze(analyze::AnalyzeArgs),

    /// Scrape a page's title and meta description
    Scrape(scrape::ScrapeArgs),
}

impl Cli {
    /// Audit settings from flags, falling back to the environment.
    pub fn audit_config(&self) -> AuditConfig {
        let config = AuditConfig::default().with_api_key(self.api_key.clone());
        if self.pagespeed_url.trim().is_empty() {
            config
        } else {
            config.with_endpoint(self.pagespeed_url.as_str())
        }
    }

    pub async fn execute(self) -> Result<()> {
        let config = self.audit_config();

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Analyze(args) => analyze::execute(args, config).await,
            Commands::Scrape(args) => scrape::execute(args, config).await,
        }
    }
}
