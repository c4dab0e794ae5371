//! Authentication endpoints.

use tracing::info;

use securticket_core::error::AppError;
use securticket_core::result::AppResult;
use securticket_entity::auth::{
    ChangePasswordRequest, LockoutNotice, LoginRequest, LoginSuccess, PasswordStrength,
    RegisterRequest,
};
use securticket_entity::user::{ProfileUpdate, UserProfile};

use crate::http::{ApiClient, Method};
use crate::response::{self, ApiFailure, RATE_LIMIT_MESSAGE};

/// Discriminated outcome of a login attempt.
///
/// Only transport-level failures surface as `Err`; every response the
/// server can produce maps to a variant, so callers branch exhaustively.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Tokens issued; the session has been established.
    Success(LoginSuccess),
    /// The account is temporarily locked.
    Locked(LockoutNotice),
    /// Too many attempts from this address.
    RateLimited {
        /// Transient message to display.
        message: String,
    },
    /// Credentials rejected.
    Rejected {
        /// Reason to display.
        message: String,
        /// Remaining attempts before lockout, when the server reveals it.
        attempts_remaining: Option<u32>,
    },
}

impl ApiClient {
    /// POST `/auth/login/` — exchange credentials for tokens.
    ///
    /// On success the session is persisted before returning. Login goes
    /// over the unauthenticated path: a 401 here means rejected
    /// credentials, never an expired token, so no renewal is attempted.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let body = serde_json::to_value(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;

        let response = self
            .execute_public(Method::Post, "/auth/login/", Some(body))
            .await?;

        let outcome = match ApiFailure::classify(&response) {
            None => {
                let success: LoginSuccess = response.deserialize()?;
                self.session()
                    .establish_session(&success.access, &success.refresh, &success.user)
                    .await?;
                LoginOutcome::Success(success)
            }
            Some(ApiFailure::Locked(notice)) => LoginOutcome::Locked(notice),
            Some(ApiFailure::RateLimited) => LoginOutcome::RateLimited {
                message: RATE_LIMIT_MESSAGE.to_string(),
            },
            Some(ApiFailure::Unauthorized {
                message,
                attempts_remaining,
            }) => LoginOutcome::Rejected {
                message,
                attempts_remaining,
            },
            Some(ApiFailure::Validation(message)) | Some(ApiFailure::Forbidden(message)) => {
                LoginOutcome::Rejected {
                    message,
                    attempts_remaining: None,
                }
            }
            Some(_) => LoginOutcome::Rejected {
                message: "Login failed. Please check your credentials.".to_string(),
                attempts_remaining: None,
            },
        };

        Ok(outcome)
    }

    /// POST `/auth/register/` — create an account. The server issues
    /// tokens immediately, so the session is established like a login.
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<LoginSuccess> {
        let body = serde_json::to_value(request)?;
        let response = self
            .execute_public(Method::Post, "/auth/register/", Some(body))
            .await?;
        let success: LoginSuccess = response::into_result(response)?;
        self.session()
            .establish_session(&success.access, &success.refresh, &success.user)
            .await?;
        Ok(success)
    }

    /// POST `/auth/logout/` — best-effort server-side logout log; the
    /// local session is cleared regardless of what the server says.
    pub async fn logout(&self) -> AppResult<()> {
        let result = self.dispatch(Method::Post, "/auth/logout/", None).await;
        self.session().terminate_session().await?;
        match result {
            Ok(_) => {}
            Err(e) if e.requires_login() => {}
            Err(e) => info!(error = %e, "Server logout call failed; session cleared locally"),
        }
        Ok(())
    }

    /// GET `/auth/profile/` — fetch the current profile and refresh the
    /// stored copy.
    pub async fn fetch_profile(&self) -> AppResult<UserProfile> {
        let response = self.dispatch(Method::Get, "/auth/profile/", None).await?;
        let profile: UserProfile = response::into_result(response)?;
        self.session().replace_user(&profile).await?;
        Ok(profile)
    }

    /// PUT `/auth/profile/update/` — update profile fields; the stored
    /// copy is replaced with the server's response.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> AppResult<UserProfile> {
        if update.is_empty() {
            return Err(AppError::validation("No profile fields to update"));
        }
        let body = serde_json::to_value(update)?;
        let response = self
            .dispatch(Method::Put, "/auth/profile/update/", Some(body))
            .await?;
        let profile: UserProfile = response::into_result(response)?;
        self.session().replace_user(&profile).await?;
        Ok(profile)
    }

    /// POST `/auth/change-password/` — rotate the password. Field-level
    /// validation errors surface verbatim.
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> AppResult<()> {
        let body = serde_json::to_value(request)?;
        let response = self
            .dispatch(Method::Post, "/auth/change-password/", Some(body))
            .await?;
        response::into_unit_result(response)
    }

    /// POST `/auth/check-password-strength/` — advisory scoring only; the
    /// server enforces the real policy at registration and change time.
    pub async fn check_password_strength(&self, password: &str) -> AppResult<PasswordStrength> {
        let body = serde_json::json!({ "password": password });
        let response = self
            .execute_public(Method::Post, "/auth/check-password-strength/", Some(body))
            .await?;
        response::into_result(response)
    }
}
