//! Session manager: persisted tokens and profile with independent
//! expirations.
//!
//! The access token, refresh token, and profile copy are stored under
//! separate keys, each wrapped in an expiry envelope (1 day for the access
//! token, 7 days for the refresh token and profile). Expired or corrupt
//! entries read back as absent and are purged rather than surfaced as
//! errors.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use securticket_core::config::session::SessionConfig;
use securticket_core::result::AppResult;
use securticket_entity::user::UserProfile;

use crate::store::StateStore;

/// Storage key for the access token entry.
pub const KEY_ACCESS_TOKEN: &str = "access_token";
/// Storage key for the refresh token entry.
pub const KEY_REFRESH_TOKEN: &str = "refresh_token";
/// Storage key for the persisted user profile.
pub const KEY_USER: &str = "user";

/// Expiry envelope around a persisted value.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

impl<T> StoredEntry<T> {
    fn new(value: T, ttl_hours: u64) -> Self {
        Self {
            value,
            expires_at: Utc::now() + Duration::hours(ttl_hours as i64),
        }
    }

    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Owns persisted authentication state.
///
/// A session is created on successful login, has its access token replaced
/// in place on silent renewal, and is destroyed wholesale on logout or
/// unrecoverable renewal failure.
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: Arc<dyn StateStore>,
    config: SessionConfig,
}

impl SessionManager {
    /// Create a session manager over the given store.
    pub fn new(store: Arc<dyn StateStore>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    /// The underlying state store, shared with the lockout gate.
    pub fn store(&self) -> Arc<dyn StateStore> {
        Arc::clone(&self.store)
    }

    /// Persist a freshly issued session, overwriting any prior one.
    pub async fn establish_session(
        &self,
        access: &str,
        refresh: &str,
        user: &UserProfile,
    ) -> AppResult<()> {
        self.write_entry(
            KEY_ACCESS_TOKEN,
            &access.to_string(),
            self.config.access_token_ttl_hours,
        )
        .await?;
        self.write_entry(
            KEY_REFRESH_TOKEN,
            &refresh.to_string(),
            self.config.refresh_token_ttl_hours,
        )
        .await?;
        self.write_entry(KEY_USER, user, self.config.profile_ttl_hours)
            .await?;
        info!(username = %user.username, "Session established");
        Ok(())
    }

    /// Replace the stored access token after a silent renewal.
    pub async fn replace_access_token(&self, access: &str) -> AppResult<()> {
        self.write_entry(
            KEY_ACCESS_TOKEN,
            &access.to_string(),
            self.config.access_token_ttl_hours,
        )
        .await?;
        debug!("Access token replaced after renewal");
        Ok(())
    }

    /// Replace the stored profile copy after a profile update.
    pub async fn replace_user(&self, user: &UserProfile) -> AppResult<()> {
        self.write_entry(KEY_USER, user, self.config.profile_ttl_hours)
            .await
    }

    /// The current access token, if present and unexpired.
    pub async fn access_token(&self) -> Option<String> {
        self.read_entry(KEY_ACCESS_TOKEN).await
    }

    /// The current refresh token, if present and unexpired.
    pub async fn refresh_token(&self) -> Option<String> {
        self.read_entry(KEY_REFRESH_TOKEN).await
    }

    /// The persisted user profile, or `None` if absent, expired, or
    /// unparsable. Corrupt data is treated as absent, never as an error.
    pub async fn current_user(&self) -> Option<UserProfile> {
        self.read_entry(KEY_USER).await
    }

    /// Whether a non-expired access token is present.
    pub async fn is_authenticated(&self) -> bool {
        self.access_token().await.is_some()
    }

    /// Whether the stored profile carries the admin role.
    pub async fn is_admin(&self) -> bool {
        self.current_user()
            .await
            .map(|u| u.role.is_admin())
            .unwrap_or(false)
    }

    /// Destroy the session: all three entries are removed. Callers treat
    /// completion as the signal to return to the login entry point.
    pub async fn terminate_session(&self) -> AppResult<()> {
        self.store.remove(KEY_ACCESS_TOKEN).await?;
        self.store.remove(KEY_REFRESH_TOKEN).await?;
        self.store.remove(KEY_USER).await?;
        info!("Session terminated");
        Ok(())
    }

    async fn write_entry<T: Serialize>(&self, key: &str, value: &T, ttl_hours: u64) -> AppResult<()> {
        let entry = StoredEntry::new(value, ttl_hours);
        let json = serde_json::to_string(&entry)?;
        self.store.write(key, &json).await
    }

    /// Read an entry, purging it when expired or corrupt.
    async fn read_entry<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.read(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read session entry");
                return None;
            }
        };

        match serde_json::from_str::<StoredEntry<T>>(&raw) {
            Ok(entry) if entry.is_expired() => {
                debug!(key, "Session entry expired; purging");
                let _ = self.store.remove(key).await;
                None
            }
            Ok(entry) => Some(entry.value),
            Err(e) => {
                warn!(key, error = %e, "Corrupt session entry; purging");
                let _ = self.store.remove(key).await;
                None
            }
        }
    }
}
