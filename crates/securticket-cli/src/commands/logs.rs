//! Activity log CLI commands (admin audit trail).

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use securticket_core::error::AppError;
use securticket_entity::log::ActivityLogEntry;

/// Arguments for the logs command
#[derive(Debug, Args)]
pub struct LogsArgs {
    /// Only entries for this user ID
    #[arg(short, long)]
    pub user: Option<i64>,
    /// Show at most this many entries
    #[arg(short, long, default_value_t = 50)]
    pub limit: usize,
}

/// Log display row for table output
#[derive(Debug, Serialize, Tabled)]
struct LogRow {
    /// Entry ID
    id: i64,
    /// Timestamp
    timestamp: String,
    /// Username
    user: String,
    /// Action
    action: String,
    /// Client IP
    ip: String,
}

impl From<&ActivityLogEntry> for LogRow {
    fn from(entry: &ActivityLogEntry) -> Self {
        LogRow {
            id: entry.id,
            timestamp: entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            user: entry
                .user_username
                .clone()
                .unwrap_or_else(|| "anonymous".to_string()),
            action: entry.action.clone(),
            ip: entry.ip_address.clone().unwrap_or_default(),
        }
    }
}

/// Execute the logs command
pub async fn execute(
    args: &LogsArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = super::build_client(config_path)?;

    let entries = client.list_activity_logs(args.user).await?;
    let rows: Vec<LogRow> = entries.iter().take(args.limit).map(LogRow::from).collect();
    output::print_list(&rows, format);

    Ok(())
}
