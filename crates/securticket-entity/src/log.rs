//! Activity log types (admin audit trail).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single activity log entry from the admin audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Numeric log entry ID.
    pub id: i64,
    /// ID of the acting user, absent for anonymous events.
    #[serde(default)]
    pub user: Option<i64>,
    /// Username of the acting user, when embedded.
    #[serde(default)]
    pub user_username: Option<String>,
    /// Human-readable action description.
    pub action: String,
    /// Client IP recorded by the server.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Client user agent recorded by the server.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Free-form structured metadata.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    /// When the action occurred.
    pub timestamp: DateTime<Utc>,
}
