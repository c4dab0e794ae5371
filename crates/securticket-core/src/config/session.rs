//! Local session persistence configuration.

use serde::{Deserialize, Serialize};

/// Settings for locally persisted session and lockout state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory where session and lockout snapshots are stored.
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
    /// Access token lifetime in hours (1 day).
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_hours: u64,
    /// Refresh token lifetime in hours (7 days).
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_hours: u64,
    /// Stored profile lifetime in hours (7 days).
    #[serde(default = "default_profile_ttl")]
    pub profile_ttl_hours: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            access_token_ttl_hours: default_access_ttl(),
            refresh_token_ttl_hours: default_refresh_ttl(),
            profile_ttl_hours: default_profile_ttl(),
        }
    }
}

fn default_state_dir() -> String {
    ".securticket".to_string()
}

fn default_access_ttl() -> u64 {
    24
}

fn default_refresh_ttl() -> u64 {
    168
}

fn default_profile_ttl() -> u64 {
    168
}
