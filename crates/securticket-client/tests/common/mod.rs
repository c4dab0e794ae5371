//! Shared test helpers: a scripted transport and session fixtures.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use securticket_client::{ApiClient, ApiRequest, ApiResponse, HttpTransport};
use securticket_core::config::session::SessionConfig;
use securticket_core::error::AppError;
use securticket_core::result::AppResult;
use securticket_session::{MemoryStateStore, SessionManager};

/// Transport that replays scripted responses and records every request.
#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, AppError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Script the next response.
    pub fn push(&self, status: u16, body: serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse { status, body }));
    }

    /// Script a transport-level failure.
    pub fn push_err(&self, error: AppError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Everything executed so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn execute(&self, request: &ApiRequest) -> AppResult<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("No scripted response left")))
    }
}

/// A client over a fresh in-memory store and the given transport.
pub fn client_with(transport: Arc<FakeTransport>) -> (ApiClient, Arc<MemoryStateStore>) {
    let store = Arc::new(MemoryStateStore::new());
    let session = SessionManager::new(store.clone(), SessionConfig::default());
    (ApiClient::new(transport, session), store)
}

/// JSON body of a successful login for `username`.
pub fn login_success_body(username: &str) -> serde_json::Value {
    serde_json::json!({
        "access": "access-1",
        "refresh": "refresh-1",
        "user": {
            "id": 1,
            "username": username,
            "email": format!("{username}@example.com"),
            "first_name": "",
            "last_name": "",
            "role": "customer"
        },
        "message": "Login successful"
    })
}
