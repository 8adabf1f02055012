//! Web server command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use webaudit_core::AuditConfig;
use webaudit_web::config::{DEFAULT_CORS_ORIGIN, DEFAULT_HOST, DEFAULT_PORT};
use webaudit_web::ServerConfig;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "WEBAUDIT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "WEBAUDIT_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Origin allowed to call /analyze cross-origin
    #[arg(long, env = "WEBAUDIT_CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (default: logs/webaudit.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: AuditConfig) -> Result<()> {
    let server = ServerConfig {
        host: args.host,
        port: args.port,
        cors_origin: args.cors_origin,
    };

    println!();
    println!("  {} {}", "WebAudit".cyan().bold(), "Web Server".bold());
    println!();
    println!(
        "  {}    POST http://{}/analyze",
        "Analyze".green(),
        server.addr()
    );
    println!(
        "  {}   POST http://{}/api/analyze",
        "Metadata".green(),
        server.addr()
    );
    println!("  {}       {}", "CORS".green(), server.cors_origin);
    if config.pagespeed_api_key.is_none() {
        println!("  {}", "No PageSpeed API key set (PAGESPEED_API_KEY)".yellow());
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    webaudit_web::run_server(config, server).await?;

    Ok(())
}
