//! One-shot website analysis.

use anyhow::Result;
use clap::Args;
use webaudit_core::{Analyzer, AuditConfig};

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// URL or bare domain to analyze
    pub url: String,

    /// Print the raw JSON report
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: AnalyzeArgs, config: AuditConfig) -> Result<()> {
    config.validate()?;
    let analyzer = Analyzer::from_config(&config)?;

    let report = analyzer.analyze(&args.url).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_report(&report);
    }

    Ok(())
}
