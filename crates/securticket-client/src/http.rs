//! HTTP dispatch with bearer attachment and one-shot silent renewal.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use securticket_core::config::api::ApiConfig;
use securticket_core::error::AppError;
use securticket_core::result::AppResult;
use securticket_entity::auth::TokenRefreshResponse;
use securticket_session::SessionManager;

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request about to go over the transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the configured base URL, e.g. `/auth/login/`.
    pub path: String,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
    /// Bearer credential, attached by the dispatcher when present.
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// Build a request without a credential; `dispatch` fills it in.
    pub fn new(method: Method, path: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            bearer: None,
        }
    }
}

/// A decoded response: status plus parsed JSON body (`null` when the body
/// was empty or not JSON).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed body.
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body into a typed value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_value(self.body.clone()).map_err(|e| {
            AppError::internal(format!(
                "Unexpected response shape (status {}): {e}",
                self.status
            ))
        })
    }
}

/// The transport seam: executes a single request, no retry logic.
///
/// Production uses [`ReqwestTransport`]; tests script responses through a
/// fake implementation.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug + 'static {
    /// Execute the request and decode the response.
    async fn execute(&self, request: &ApiRequest) -> AppResult<ApiResponse>;
}

/// Transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Build a transport from API configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> AppResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if let Some(bearer) = &request.bearer {
            builder = builder.bearer_auth(bearer);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);

        debug!(method = %request.method, path = %request.path, status, "API call");
        Ok(ApiResponse { status, body })
    }
}

/// The API client: owns the transport and the session manager.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: SessionManager,
}

impl ApiClient {
    /// Build a client over the given transport and session manager.
    pub fn new(transport: Arc<dyn HttpTransport>, session: SessionManager) -> Self {
        Self { transport, session }
    }

    /// The session manager backing this client.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Execute a request on the unauthenticated path: no bearer, no
    /// renewal. Used by login, registration, and the strength check, where
    /// a 401 means rejected credentials rather than an expired token.
    pub async fn execute_public(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> AppResult<ApiResponse> {
        let request = ApiRequest::new(method, path, body);
        self.transport.execute(&request).await
    }

    /// The core contract: attach the current access token and recover from
    /// a rejected credential exactly once.
    ///
    /// On a 401 the dispatcher exchanges the refresh token for a new
    /// access token, persists it, and replays the original request once
    /// with the new credential. A second 401 on the replay, or any failure
    /// of the renewal call itself, terminates the session and returns a
    /// session-expired error that callers treat as "go to login".
    /// All other failures propagate untouched.
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> AppResult<ApiResponse> {
        let mut request = ApiRequest::new(method, path, body);
        request.bearer = self.session.access_token().await;

        let response = self.transport.execute(&request).await?;
        if response.status != 401 {
            return Ok(response);
        }

        // Single silent renewal, then a single replay. The renewal call
        // goes straight through the transport so it can never recurse.
        let Some(refresh) = self.session.refresh_token().await else {
            warn!(path, "Credential rejected and no refresh token; terminating session");
            self.session.terminate_session().await?;
            return Err(AppError::session_expired("Not authenticated"));
        };

        let renewal = ApiRequest::new(
            Method::Post,
            "/auth/token/refresh/",
            Some(serde_json::json!({ "refresh": refresh })),
        );

        let renewed = match self.transport.execute(&renewal).await {
            Ok(resp) if resp.is_success() => resp,
            Ok(resp) => {
                warn!(status = resp.status, "Token renewal rejected; terminating session");
                self.session.terminate_session().await?;
                return Err(AppError::session_expired(
                    "Session expired; please log in again",
                ));
            }
            Err(e) => {
                warn!(error = %e, "Token renewal failed; terminating session");
                self.session.terminate_session().await?;
                return Err(AppError::session_expired(
                    "Session expired; please log in again",
                ));
            }
        };

        let TokenRefreshResponse { access } = renewed.deserialize()?;
        self.session.replace_access_token(&access).await?;
        info!(path, "Access token renewed; replaying request");

        request.bearer = Some(access);
        let replay = self.transport.execute(&request).await?;
        if replay.status == 401 {
            // The renewed credential was rejected too; nothing further to
            // try on this path.
            warn!(path, "Replayed request rejected; terminating session");
            self.session.terminate_session().await?;
            return Err(AppError::session_expired(
                "Session expired; please log in again",
            ));
        }

        Ok(replay)
    }
}
