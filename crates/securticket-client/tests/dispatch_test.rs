//! Integration tests for the dispatch path: bearer attachment and the
//! one-shot silent renewal.

mod common;

use common::{client_with, FakeTransport};

use securticket_client::Method;
use securticket_core::error::ErrorKind;
use securticket_entity::user::{UserProfile, UserRole};

fn test_user() -> UserProfile {
    UserProfile {
        id: 1,
        username: "alice".into(),
        email: "alice@example.com".into(),
        first_name: "".into(),
        last_name: "".into(),
        phone: None,
        role: UserRole::Customer,
        created_at: None,
    }
}

#[tokio::test]
async fn dispatch_attaches_bearer_when_authenticated() {
    let transport = FakeTransport::new();
    let (client, _) = client_with(transport.clone());
    client
        .session()
        .establish_session("tok", "ref", &test_user())
        .await
        .unwrap();

    transport.push(200, serde_json::json!([]));
    let response = client.dispatch(Method::Get, "/events/", None).await.unwrap();

    assert_eq!(response.status, 200);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].bearer.as_deref(), Some("tok"));
}

#[tokio::test]
async fn dispatch_omits_bearer_when_unauthenticated() {
    let transport = FakeTransport::new();
    let (client, _) = client_with(transport.clone());

    transport.push(200, serde_json::json!([]));
    client.dispatch(Method::Get, "/events/", None).await.unwrap();

    assert_eq!(transport.requests()[0].bearer, None);
}

#[tokio::test]
async fn rejected_credential_renews_once_and_replays() {
    let transport = FakeTransport::new();
    let (client, _) = client_with(transport.clone());
    client
        .session()
        .establish_session("stale", "ref", &test_user())
        .await
        .unwrap();

    transport.push(401, serde_json::json!({"detail": "Token expired"}));
    transport.push(200, serde_json::json!({"access": "fresh"}));
    transport.push(200, serde_json::json!({"ok": true}));

    let response = client
        .dispatch(Method::Get, "/bookings/my_bookings/", None)
        .await
        .unwrap();
    assert_eq!(response.status, 200);

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].bearer.as_deref(), Some("stale"));
    assert_eq!(requests[1].path, "/auth/token/refresh/");
    assert_eq!(
        requests[1].body.as_ref().unwrap()["refresh"].as_str(),
        Some("ref")
    );
    // The replay carries the renewed credential.
    assert_eq!(requests[2].path, "/bookings/my_bookings/");
    assert_eq!(requests[2].bearer.as_deref(), Some("fresh"));

    // The new access token was persisted in place.
    assert_eq!(client.session().access_token().await.as_deref(), Some("fresh"));
    assert_eq!(client.session().refresh_token().await.as_deref(), Some("ref"));
}

#[tokio::test]
async fn failed_renewal_terminates_session() {
    let transport = FakeTransport::new();
    let (client, store) = client_with(transport.clone());
    client
        .session()
        .establish_session("stale", "dead-ref", &test_user())
        .await
        .unwrap();

    transport.push(401, serde_json::json!({"detail": "Token expired"}));
    transport.push(401, serde_json::json!({"detail": "Refresh token expired"}));

    let err = client
        .dispatch(Method::Get, "/auth/profile/", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::SessionExpired);
    assert!(err.requires_login());
    assert_eq!(transport.request_count(), 2);
    assert!(store.is_empty());
    assert!(!client.session().is_authenticated().await);
}

#[tokio::test]
async fn second_rejection_on_replay_does_not_renew_again() {
    let transport = FakeTransport::new();
    let (client, _) = client_with(transport.clone());
    client
        .session()
        .establish_session("stale", "ref", &test_user())
        .await
        .unwrap();

    transport.push(401, serde_json::json!({"detail": "Token expired"}));
    transport.push(200, serde_json::json!({"access": "fresh"}));
    transport.push(401, serde_json::json!({"detail": "Still rejected"}));

    let err = client
        .dispatch(Method::Get, "/auth/profile/", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::SessionExpired);
    // Exactly one renewal: original, refresh, replay. No fourth call.
    assert_eq!(transport.request_count(), 3);
    assert!(!client.session().is_authenticated().await);
}

#[tokio::test]
async fn missing_refresh_token_fails_without_renewal_call() {
    let transport = FakeTransport::new();
    let (client, _) = client_with(transport.clone());

    transport.push(401, serde_json::json!({"detail": "Not authenticated"}));
    let err = client
        .dispatch(Method::Get, "/auth/profile/", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::SessionExpired);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn non_authorization_failures_pass_through() {
    let transport = FakeTransport::new();
    let (client, _) = client_with(transport.clone());
    client
        .session()
        .establish_session("tok", "ref", &test_user())
        .await
        .unwrap();

    transport.push(400, serde_json::json!({"error": "Only 3 seats available."}));
    let response = client
        .dispatch(Method::Post, "/bookings/", Some(serde_json::json!({})))
        .await
        .unwrap();

    // No renewal attempted; caller classifies the failure.
    assert_eq!(response.status, 400);
    assert_eq!(transport.request_count(), 1);
    assert!(client.session().is_authenticated().await);
}

#[tokio::test]
async fn transport_errors_propagate_without_retry() {
    let transport = FakeTransport::new();
    let (client, _) = client_with(transport.clone());
    client
        .session()
        .establish_session("tok", "ref", &test_user())
        .await
        .unwrap();

    transport.push_err(securticket_core::AppError::transport("connection refused"));
    let err = client.dispatch(Method::Get, "/events/", None).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Transport);
    assert_eq!(transport.request_count(), 1);
    // Session untouched by a network failure.
    assert!(client.session().is_authenticated().await);
}
