//! Integration tests for the lockout-aware login flow.

mod common;

use common::{client_with, login_success_body, FakeTransport};

use chrono::{Duration, Utc};
use securticket_client::{LoginFlow, LoginResult};
use securticket_session::lockout::KEY_LOCKOUT;
use securticket_session::{LockoutGate, LockoutState, StateStore};

#[tokio::test]
async fn successful_login_establishes_session() {
    let transport = FakeTransport::new();
    let (client, _) = client_with(transport.clone());
    let mut flow = LoginFlow::restore(client.clone()).await;

    transport.push(200, login_success_body("alice"));
    let result = flow.submit("alice", "pw").await.unwrap();

    match result {
        LoginResult::Success(user) => assert_eq!(user.username, "alice"),
        other => panic!("expected Success, got {other:?}"),
    }
    assert!(client.session().is_authenticated().await);
    assert_eq!(
        client.session().access_token().await.as_deref(),
        Some("access-1")
    );
}

#[tokio::test]
async fn lockout_response_persists_snapshot_with_full_countdown() {
    let transport = FakeTransport::new();
    let (client, store) = client_with(transport.clone());
    let mut flow = LoginFlow::restore(client).await;

    let locked_until = Utc::now() + Duration::minutes(30);
    transport.push(
        403,
        serde_json::json!({
            "error": "Too many attempts",
            "locked": true,
            "locked_until": locked_until.to_rfc3339(),
        }),
    );

    let result = flow.submit("alice", "bad").await.unwrap();
    let state = match result {
        LoginResult::Locked(state) => state,
        other => panic!("expected Locked, got {other:?}"),
    };

    assert_eq!(state.username, "alice");
    assert_eq!(state.error, "Too many attempts");
    let remaining = state.remaining_ms(Utc::now());
    assert!(remaining > 29 * 60 * 1000 && remaining <= 30 * 60 * 1000);

    // Snapshot written; a reload would re-enter Locked with the same
    // absolute deadline.
    let raw = store.read(KEY_LOCKOUT).await.unwrap().expect("persisted");
    let persisted: LockoutState = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted.locked_until, state.locked_until);
}

#[tokio::test]
async fn locked_gate_blocks_submission_without_a_request() {
    let transport = FakeTransport::new();
    let (client, store) = client_with(transport.clone());

    // Seed a live lockout and restore, as after a page reload.
    let state = LockoutState {
        locked_until: Utc::now() + Duration::minutes(10),
        username: "alice".into(),
        error: "Account is locked".into(),
        captured_at: Utc::now(),
    };
    store
        .write(KEY_LOCKOUT, &serde_json::to_string(&state).unwrap())
        .await
        .unwrap();

    let mut flow = LoginFlow::restore(client).await;
    assert!(flow.gate().is_locked());

    // Even valid credentials are refused while Locked.
    let result = flow.submit("alice", "correct-password").await.unwrap();
    assert!(matches!(result, LoginResult::Blocked(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn successful_login_purges_stale_lockout_snapshot() {
    let transport = FakeTransport::new();
    let (client, store) = client_with(transport.clone());

    // Leftover snapshot, but the gate itself starts Unlocked.
    let stale = LockoutState {
        locked_until: Utc::now() - Duration::minutes(1),
        username: "alice".into(),
        error: "old".into(),
        captured_at: Utc::now() - Duration::minutes(31),
    };
    store
        .write(KEY_LOCKOUT, &serde_json::to_string(&stale).unwrap())
        .await
        .unwrap();

    let gate = LockoutGate::new(client.session().store());
    let mut flow = LoginFlow::new(client, gate);

    transport.push(200, login_success_body("alice"));
    flow.submit("alice", "pw").await.unwrap();

    assert_eq!(store.read(KEY_LOCKOUT).await.unwrap(), None);
}

#[tokio::test]
async fn attempts_remaining_warning_is_ephemeral() {
    let transport = FakeTransport::new();
    let (client, _) = client_with(transport.clone());
    let mut flow = LoginFlow::restore(client).await;

    transport.push(
        401,
        serde_json::json!({
            "error": "Invalid credentials. 2 attempts remaining before account lockout.",
            "attempts_remaining": 2
        }),
    );

    let result = flow.submit("alice", "bad").await.unwrap();
    assert!(matches!(result, LoginResult::Rejected { .. }));
    assert_eq!(flow.attempts_remaining(), Some(2));

    // The next submission clears the warning before its response arrives:
    // even a transport failure leaves it cleared.
    transport.push_err(securticket_core::AppError::transport("connection reset"));
    let _ = flow.submit("alice", "bad").await.unwrap_err();
    assert_eq!(flow.attempts_remaining(), None);
}

#[tokio::test]
async fn rate_limited_login_changes_no_state() {
    let transport = FakeTransport::new();
    let (client, store) = client_with(transport.clone());
    let mut flow = LoginFlow::restore(client.clone()).await;

    transport.push(429, serde_json::Value::Null);
    let result = flow.submit("alice", "pw").await.unwrap();

    assert!(matches!(result, LoginResult::RateLimited { .. }));
    assert!(!flow.gate().is_locked());
    assert!(store.is_empty());
    assert!(!client.session().is_authenticated().await);
}
