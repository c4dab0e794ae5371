//! Failure taxonomy for non-2xx API responses.

use securticket_core::error::AppError;
use securticket_entity::auth::LockoutNotice;

use crate::http::ApiResponse;

/// Message shown when a rate limit trips, mirroring the login form.
pub const RATE_LIMIT_MESSAGE: &str =
    "Too many login attempts from this IP. Please try again later.";

/// Discriminated failure classes decoded from status plus JSON body.
#[derive(Debug, Clone)]
pub enum ApiFailure {
    /// 401: the submitted credentials were rejected. Carries the server's
    /// remaining-attempts hint when it chose to reveal one.
    Unauthorized {
        /// Server-supplied reason.
        message: String,
        /// Failed attempts remaining before lockout.
        attempts_remaining: Option<u32>,
    },
    /// 403 with `locked: true`: the account is temporarily locked.
    Locked(LockoutNotice),
    /// 403 without the lockout flag: permission denied.
    Forbidden(String),
    /// 404: resource not found.
    NotFound(String),
    /// 429: rate limited; transient, no state change.
    RateLimited,
    /// Other 4xx: validation problem, surfaced verbatim.
    Validation(String),
    /// Anything else: unexpected server failure.
    Unexpected(String),
}

impl ApiFailure {
    /// Classify a non-success response. Success responses return `None`.
    pub fn classify(response: &ApiResponse) -> Option<Self> {
        if response.is_success() {
            return None;
        }

        let failure = match response.status {
            401 => Self::Unauthorized {
                message: error_message(response)
                    .unwrap_or_else(|| "Invalid credentials".to_string()),
                attempts_remaining: response.body["attempts_remaining"]
                    .as_u64()
                    .map(|n| n as u32),
            },
            403 if response.body["locked"].as_bool() == Some(true) => {
                match serde_json::from_value::<LockoutNotice>(response.body.clone()) {
                    Ok(notice) => Self::Locked(notice),
                    Err(_) => Self::Forbidden(
                        error_message(response).unwrap_or_else(|| "Account locked".to_string()),
                    ),
                }
            }
            403 => Self::Forbidden(
                error_message(response).unwrap_or_else(|| "Permission denied".to_string()),
            ),
            404 => Self::NotFound(
                error_message(response).unwrap_or_else(|| "Not found".to_string()),
            ),
            429 => Self::RateLimited,
            400..=499 => Self::Validation(
                error_message(response).unwrap_or_else(|| "Invalid request".to_string()),
            ),
            _ => Self::Unexpected(
                error_message(response)
                    .unwrap_or_else(|| format!("Server error (status {})", response.status)),
            ),
        };

        Some(failure)
    }
}

impl From<ApiFailure> for AppError {
    fn from(failure: ApiFailure) -> Self {
        match failure {
            ApiFailure::Unauthorized { message, .. } => AppError::authentication(message),
            ApiFailure::Locked(notice) => AppError::account_locked(notice.error),
            ApiFailure::Forbidden(message) => AppError::authorization(message),
            ApiFailure::NotFound(message) => AppError::not_found(message),
            ApiFailure::RateLimited => AppError::rate_limit(RATE_LIMIT_MESSAGE),
            ApiFailure::Validation(message) => AppError::validation(message),
            ApiFailure::Unexpected(message) => AppError::internal(message),
        }
    }
}

/// Extract a display message from an error body.
///
/// Handles both `{"error": "..."}` and DRF-style field maps like
/// `{"password": ["too short"]}`.
fn error_message(response: &ApiResponse) -> Option<String> {
    let body = &response.body;

    if let Some(error) = body["error"].as_str() {
        return Some(error.to_string());
    }
    if let Some(detail) = body["detail"].as_str() {
        return Some(detail.to_string());
    }

    let map = body.as_object()?;
    let mut parts = Vec::new();
    for (field, messages) in map {
        match messages {
            serde_json::Value::String(msg) => parts.push(format!("{field}: {msg}")),
            serde_json::Value::Array(items) => {
                for item in items {
                    if let Some(msg) = item.as_str() {
                        parts.push(format!("{field}: {msg}"));
                    }
                }
            }
            _ => {}
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

/// Convert a response into `T` on success, or the classified failure as an
/// error. Endpoint wrappers with no interesting failure variants use this.
pub fn into_result<T: serde::de::DeserializeOwned>(response: ApiResponse) -> Result<T, AppError> {
    match ApiFailure::classify(&response) {
        None => response.deserialize(),
        Some(failure) => Err(failure.into()),
    }
}

/// Like [`into_result`] for endpoints whose success body is irrelevant.
pub fn into_unit_result(response: ApiResponse) -> Result<(), AppError> {
    match ApiFailure::classify(&response) {
        None => Ok(()),
        Some(failure) => Err(failure.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ApiResponse;

    fn response(status: u16, body: serde_json::Value) -> ApiResponse {
        ApiResponse { status, body }
    }

    #[test]
    fn test_success_is_not_a_failure() {
        assert!(ApiFailure::classify(&response(200, serde_json::json!({}))).is_none());
        assert!(ApiFailure::classify(&response(201, serde_json::json!({}))).is_none());
    }

    #[test]
    fn test_unauthorized_carries_attempts_remaining() {
        let resp = response(
            401,
            serde_json::json!({"error": "Invalid credentials. 2 attempts remaining.", "attempts_remaining": 2}),
        );
        match ApiFailure::classify(&resp) {
            Some(ApiFailure::Unauthorized {
                attempts_remaining, ..
            }) => assert_eq!(attempts_remaining, Some(2)),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn test_locked_flag_discriminates_403() {
        let locked = response(
            403,
            serde_json::json!({"error": "Account is locked", "locked": true, "locked_until": "2026-09-01T10:00:00Z"}),
        );
        assert!(matches!(
            ApiFailure::classify(&locked),
            Some(ApiFailure::Locked(_))
        ));

        let plain = response(403, serde_json::json!({"error": "Permission denied"}));
        assert!(matches!(
            ApiFailure::classify(&plain),
            Some(ApiFailure::Forbidden(_))
        ));
    }

    #[test]
    fn test_rate_limited() {
        assert!(matches!(
            ApiFailure::classify(&response(429, serde_json::Value::Null)),
            Some(ApiFailure::RateLimited)
        ));
    }

    #[test]
    fn test_field_errors_flatten() {
        let resp = response(
            400,
            serde_json::json!({"password": ["Password fields didn't match."]}),
        );
        match ApiFailure::classify(&resp) {
            Some(ApiFailure::Validation(msg)) => {
                assert_eq!(msg, "password: Password fields didn't match.");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
