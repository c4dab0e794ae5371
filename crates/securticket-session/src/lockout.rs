//! Lockout countdown state machine.
//!
//! Tracks the client-observed "account temporarily locked" state derived
//! from a login response, persists it so the countdown survives restarts,
//! and counts down to unlock from the absolute deadline. Each tick
//! recomputes the remaining time from `locked_until` rather than
//! decrementing a counter, so the countdown stays correct across process
//! suspension or clock drift within tick granularity.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use securticket_core::result::AppResult;
use securticket_entity::auth::LockoutNotice;

use crate::store::StateStore;

/// Storage key for the persisted lockout snapshot.
pub const KEY_LOCKOUT: &str = "lockout_info";

/// How long the transient "unlocked" notice stays visible.
pub const UNLOCK_NOTICE_SECONDS: i64 = 5;

/// The server's fixed lockout window, used only when the locking response
/// omits the unlock timestamp.
const FALLBACK_LOCKOUT_MINUTES: i64 = 30;

/// Persisted lockout snapshot.
///
/// Exists precisely when there is no valid session. Active while
/// `locked_until` is in the future; at or past the deadline it is expired
/// and must be purged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockoutState {
    /// Absolute unlock deadline.
    pub locked_until: DateTime<Utc>,
    /// Username the lockout was observed for.
    pub username: String,
    /// Human-readable reason from the server.
    pub error: String,
    /// When the lockout response was observed.
    pub captured_at: DateTime<Utc>,
}

impl LockoutState {
    /// Remaining lock time at `now`, in milliseconds. Negative once the
    /// deadline has passed.
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        (self.locked_until - now).num_milliseconds()
    }

    /// Whether the lock is still active at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.locked_until > now
    }
}

/// Phases of the login form around a lockout.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginPhase {
    /// Normal login; credential inputs enabled.
    Unlocked,
    /// Countdown active; credential inputs disabled.
    Locked(LockoutState),
    /// Transient "unlocked" notice, auto-reverts to [`LoginPhase::Unlocked`].
    JustUnlocked {
        /// When the notice disappears.
        notice_until: DateTime<Utc>,
    },
}

/// Result of advancing the state machine by one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Still locked; countdown to display.
    Locked {
        /// Milliseconds until unlock.
        remaining_ms: i64,
    },
    /// The deadline passed this tick; snapshot purged, inputs re-enabled.
    Unlocked,
    /// The transient notice interval ended this tick.
    NoticeCleared,
    /// Nothing to do.
    Idle,
}

/// The lockout countdown controller.
///
/// Owns the current [`LoginPhase`] and the persisted snapshot behind it.
#[derive(Debug)]
pub struct LockoutGate {
    store: Arc<dyn StateStore>,
    phase: LoginPhase,
}

impl LockoutGate {
    /// Build a gate in the `Unlocked` phase without consulting storage.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            store,
            phase: LoginPhase::Unlocked,
        }
    }

    /// Build a gate from persisted state, the startup transition.
    ///
    /// A snapshot with a future deadline re-enters `Locked` with the same
    /// absolute deadline (the countdown is monotonic across restarts). An
    /// expired or unparsable snapshot is purged and the gate starts
    /// `Unlocked`.
    pub async fn restore(store: Arc<dyn StateStore>) -> Self {
        let mut gate = Self::new(store);

        let raw = match gate.store.read(KEY_LOCKOUT).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return gate,
            Err(e) => {
                warn!(error = %e, "Failed to read lockout snapshot");
                return gate;
            }
        };

        match serde_json::from_str::<LockoutState>(&raw) {
            Ok(state) if state.is_active(Utc::now()) => {
                info!(
                    username = %state.username,
                    locked_until = %state.locked_until,
                    "Restored active lockout"
                );
                gate.phase = LoginPhase::Locked(state);
            }
            Ok(_) => {
                debug!("Persisted lockout already expired; purging");
                let _ = gate.store.remove(KEY_LOCKOUT).await;
            }
            Err(e) => {
                warn!(error = %e, "Corrupt lockout snapshot; purging");
                let _ = gate.store.remove(KEY_LOCKOUT).await;
            }
        }

        gate
    }

    /// Current phase.
    pub fn phase(&self) -> &LoginPhase {
        &self.phase
    }

    /// Whether credential input is currently blocked.
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, LoginPhase::Locked(_))
    }

    /// The active lockout state, if any.
    pub fn lockout(&self) -> Option<&LockoutState> {
        match &self.phase {
            LoginPhase::Locked(state) => Some(state),
            _ => None,
        }
    }

    /// Enter `Locked` from a server lockout response and persist the
    /// snapshot.
    ///
    /// The response that locks the account on the final failed attempt may
    /// omit `locked_until`; the server's fixed 30-minute window is used as
    /// the deadline in that case.
    pub async fn record_lockout(
        &mut self,
        notice: &LockoutNotice,
        username: &str,
    ) -> AppResult<LockoutState> {
        let captured_at = Utc::now();
        let locked_until = notice
            .locked_until
            .unwrap_or(captured_at + Duration::minutes(FALLBACK_LOCKOUT_MINUTES));

        let state = LockoutState {
            locked_until,
            username: username.to_string(),
            error: notice.error.clone(),
            captured_at,
        };

        let json = serde_json::to_string(&state)?;
        self.store.write(KEY_LOCKOUT, &json).await?;
        info!(username, locked_until = %locked_until, "Account lockout recorded");

        self.phase = LoginPhase::Locked(state.clone());
        Ok(state)
    }

    /// Advance the state machine by one tick at `now`.
    pub async fn tick(&mut self, now: DateTime<Utc>) -> Tick {
        match &self.phase {
            LoginPhase::Locked(state) => {
                let remaining = state.remaining_ms(now);
                if remaining <= 0 {
                    if let Err(e) = self.store.remove(KEY_LOCKOUT).await {
                        warn!(error = %e, "Failed to purge expired lockout snapshot");
                    }
                    info!("Lockout expired; account unlocked");
                    self.phase = LoginPhase::JustUnlocked {
                        notice_until: now + Duration::seconds(UNLOCK_NOTICE_SECONDS),
                    };
                    Tick::Unlocked
                } else {
                    Tick::Locked {
                        remaining_ms: remaining,
                    }
                }
            }
            LoginPhase::JustUnlocked { notice_until } => {
                if now >= *notice_until {
                    self.phase = LoginPhase::Unlocked;
                    Tick::NoticeCleared
                } else {
                    Tick::Idle
                }
            }
            LoginPhase::Unlocked => Tick::Idle,
        }
    }

    /// Purge any persisted lockout unconditionally; the transition taken
    /// on every successful login, whatever the current phase.
    pub async fn clear_on_success(&mut self) -> AppResult<()> {
        self.store.remove(KEY_LOCKOUT).await?;
        self.phase = LoginPhase::Unlocked;
        Ok(())
    }
}

/// Render a remaining millisecond delta as `"{m}m {s}s"`.
///
/// Minutes wrap at the hour, matching the server's 30-minute lock window.
pub fn format_remaining(remaining_ms: i64) -> String {
    let remaining_ms = remaining_ms.max(0);
    let minutes = (remaining_ms % (1000 * 60 * 60)) / (1000 * 60);
    let seconds = (remaining_ms % (1000 * 60)) / 1000;
    format!("{minutes}m {seconds}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStateStore;

    fn notice(locked_until: Option<DateTime<Utc>>) -> LockoutNotice {
        LockoutNotice {
            error: "Too many attempts".into(),
            locked: true,
            locked_until,
            minutes_remaining: None,
            seconds_remaining: None,
        }
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(125_000), "2m 5s");
        assert_eq!(format_remaining(0), "0m 0s");
        assert_eq!(format_remaining(-1_000), "0m 0s");
        assert_eq!(format_remaining(59_999), "0m 59s");
        assert_eq!(format_remaining(30 * 60 * 1000), "30m 0s");
    }

    #[tokio::test]
    async fn test_record_lockout_persists_and_locks() {
        let store = Arc::new(MemoryStateStore::new());
        let mut gate = LockoutGate::new(store.clone());
        let until = Utc::now() + Duration::minutes(30);

        gate.record_lockout(&notice(Some(until)), "alice")
            .await
            .unwrap();

        assert!(gate.is_locked());
        let raw = store.read(KEY_LOCKOUT).await.unwrap().expect("persisted");
        let state: LockoutState = serde_json::from_str(&raw).unwrap();
        assert_eq!(state.username, "alice");
        assert_eq!(state.locked_until, until);

        // Countdown starts near the full 30 minutes.
        let remaining = state.remaining_ms(Utc::now());
        assert!(remaining > 29 * 60 * 1000 && remaining <= 30 * 60 * 1000);
    }

    #[tokio::test]
    async fn test_missing_deadline_falls_back_to_thirty_minutes() {
        let store = Arc::new(MemoryStateStore::new());
        let mut gate = LockoutGate::new(store);

        let state = gate.record_lockout(&notice(None), "bob").await.unwrap();
        let window = state.locked_until - state.captured_at;
        assert_eq!(window.num_minutes(), 30);
    }

    #[tokio::test]
    async fn test_restore_future_deadline_reenters_locked() {
        let store = Arc::new(MemoryStateStore::new());
        let until = Utc::now() + Duration::minutes(10);
        {
            let mut gate = LockoutGate::new(store.clone());
            gate.record_lockout(&notice(Some(until)), "alice")
                .await
                .unwrap();
        }

        let gate = LockoutGate::restore(store).await;
        let state = gate.lockout().expect("locked after restore");
        // Same absolute deadline, not reset to a full window.
        assert_eq!(state.locked_until, until);
    }

    #[tokio::test]
    async fn test_restore_past_deadline_purges() {
        let store = Arc::new(MemoryStateStore::new());
        let stale = LockoutState {
            locked_until: Utc::now() - Duration::minutes(1),
            username: "alice".into(),
            error: "locked".into(),
            captured_at: Utc::now() - Duration::minutes(31),
        };
        store
            .write(KEY_LOCKOUT, &serde_json::to_string(&stale).unwrap())
            .await
            .unwrap();

        let gate = LockoutGate::restore(store.clone()).await;
        assert!(!gate.is_locked());
        assert_eq!(store.read(KEY_LOCKOUT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_corrupt_snapshot_purges() {
        let store = Arc::new(MemoryStateStore::new());
        store.write(KEY_LOCKOUT, "{broken").await.unwrap();

        let gate = LockoutGate::restore(store.clone()).await;
        assert!(!gate.is_locked());
        assert_eq!(store.read(KEY_LOCKOUT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_tick_through_expiry_and_notice() {
        let store = Arc::new(MemoryStateStore::new());
        let mut gate = LockoutGate::new(store.clone());
        let until = Utc::now() + Duration::seconds(2);
        gate.record_lockout(&notice(Some(until)), "alice")
            .await
            .unwrap();

        // Before the deadline: still locked, remaining derived from the
        // absolute timestamp.
        match gate.tick(until - Duration::seconds(1)).await {
            Tick::Locked { remaining_ms } => assert_eq!(remaining_ms, 1_000),
            other => panic!("expected Locked, got {other:?}"),
        }

        // At the deadline: unlock, purge.
        assert_eq!(gate.tick(until).await, Tick::Unlocked);
        assert!(!gate.is_locked());
        assert_eq!(store.read(KEY_LOCKOUT).await.unwrap(), None);

        // Notice persists for 5 seconds, then clears.
        assert_eq!(gate.tick(until + Duration::seconds(1)).await, Tick::Idle);
        assert_eq!(
            gate.tick(until + Duration::seconds(UNLOCK_NOTICE_SECONDS)).await,
            Tick::NoticeCleared
        );
        assert_eq!(*gate.phase(), LoginPhase::Unlocked);
    }

    #[tokio::test]
    async fn test_clear_on_success_from_any_phase() {
        let store = Arc::new(MemoryStateStore::new());
        let mut gate = LockoutGate::new(store.clone());
        gate.record_lockout(&notice(Some(Utc::now() + Duration::minutes(5))), "alice")
            .await
            .unwrap();

        gate.clear_on_success().await.unwrap();
        assert_eq!(*gate.phase(), LoginPhase::Unlocked);
        assert_eq!(store.read(KEY_LOCKOUT).await.unwrap(), None);
    }
}
