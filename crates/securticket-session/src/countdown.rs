//! Cancelable one-second countdown ticker.
//!
//! Drives a [`LockoutGate`] through its timed transitions on a recurring
//! interval and publishes the latest countdown display over a watch
//! channel. The ticker is a cooperative task with an explicit stop handle;
//! dropping the handle also stops it, so a torn-down caller cannot leak a
//! callback holding a stale gate.

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use securticket_core::result::AppResult;
use securticket_core::AppError;

use crate::lockout::{format_remaining, LockoutGate, Tick};

/// Event published on each tick.
#[derive(Debug, Clone, PartialEq)]
pub enum CountdownEvent {
    /// Countdown running; `display` is the `"{m}m {s}s"` rendering.
    Remaining {
        /// Formatted remaining time.
        display: String,
        /// Raw millisecond delta.
        remaining_ms: i64,
    },
    /// The lock expired; the transient unlocked notice is showing.
    Unlocked,
    /// The notice interval ended; the ticker is done.
    Finished,
}

/// Stop handle for a running countdown.
pub struct CountdownHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<LockoutGate>,
}

impl CountdownHandle {
    /// Request the ticker to stop at the next tick boundary.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Wait for the ticker to finish and take the gate back.
    pub async fn join(self) -> AppResult<LockoutGate> {
        self.task
            .await
            .map_err(|e| AppError::internal(format!("Countdown task failed: {e}")))
    }
}

/// Spawn a one-second ticker that advances the gate until the unlock
/// notice clears or the handle stops it.
///
/// Each tick recomputes the remaining time from the absolute deadline, so
/// the countdown stays monotone across suspend/resume.
pub fn spawn_countdown(mut gate: LockoutGate) -> (CountdownHandle, watch::Receiver<CountdownEvent>) {
    let initial = match gate.lockout() {
        Some(state) => {
            let remaining = state.remaining_ms(Utc::now());
            CountdownEvent::Remaining {
                display: format_remaining(remaining),
                remaining_ms: remaining,
            }
        }
        None => CountdownEvent::Finished,
    };

    let (event_tx, event_rx) = watch::channel(initial);
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        // The first tick of a tokio interval fires immediately.
        interval.tick().await;

        loop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    // A send of `true` or a dropped handle both stop the task.
                    if changed.is_err() || *shutdown_rx.borrow() {
                        debug!("Countdown ticker stopped");
                        break;
                    }
                }
                _ = interval.tick() => {
                    match gate.tick(Utc::now()).await {
                        Tick::Locked { remaining_ms } => {
                            let _ = event_tx.send(CountdownEvent::Remaining {
                                display: format_remaining(remaining_ms),
                                remaining_ms,
                            });
                        }
                        Tick::Unlocked => {
                            let _ = event_tx.send(CountdownEvent::Unlocked);
                        }
                        Tick::NoticeCleared => {
                            let _ = event_tx.send(CountdownEvent::Finished);
                            break;
                        }
                        Tick::Idle => {
                            if !gate.is_locked() && !matches!(
                                gate.phase(),
                                crate::lockout::LoginPhase::JustUnlocked { .. }
                            ) {
                                let _ = event_tx.send(CountdownEvent::Finished);
                                break;
                            }
                        }
                    }
                }
            }
        }

        gate
    });

    (
        CountdownHandle {
            shutdown: shutdown_tx,
            task,
        },
        event_rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lockout::LockoutGate;
    use crate::store::MemoryStateStore;
    use chrono::Duration;
    use securticket_entity::auth::LockoutNotice;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unlocked_gate_finishes_immediately() {
        let gate = LockoutGate::new(Arc::new(MemoryStateStore::new()));
        let (handle, rx) = spawn_countdown(gate);
        assert_eq!(*rx.borrow(), CountdownEvent::Finished);
        let gate = handle.join().await.unwrap();
        assert!(!gate.is_locked());
    }

    #[tokio::test]
    async fn test_stop_returns_gate_still_locked() {
        let store = Arc::new(MemoryStateStore::new());
        let mut gate = LockoutGate::new(store);
        gate.record_lockout(
            &LockoutNotice {
                error: "locked".into(),
                locked: true,
                locked_until: Some(Utc::now() + Duration::minutes(10)),
                minutes_remaining: None,
                seconds_remaining: None,
            },
            "alice",
        )
        .await
        .unwrap();

        let (handle, rx) = spawn_countdown(gate);
        match &*rx.borrow() {
            CountdownEvent::Remaining { remaining_ms, .. } => {
                assert!(*remaining_ms > 9 * 60 * 1000);
            }
            other => panic!("expected Remaining, got {other:?}"),
        }

        handle.stop();
        let gate = handle.join().await.unwrap();
        assert!(gate.is_locked());
    }
}
