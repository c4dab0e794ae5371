//! SecurTicket CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Cli;
use securticket_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG beats the configured level; a broken config file still
    // gets default logging so the real error can be reported.
    let logging = AppConfig::load(&cli.config)
        .map(|c| c.logging)
        .unwrap_or_default();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    if let Err(e) = cli.execute().await {
        eprintln!("Error: {}", e);
        if e.requires_login() {
            eprintln!("Please run `securticket login` and try again.");
        }
        std::process::exit(1);
    }
}
