//! Authentication request and response payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::user::UserProfile;

/// Credentials submitted to the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Plaintext password, sent only over the transport.
    pub password: String,
}

/// Successful login or registration response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginSuccess {
    /// Short-lived bearer credential.
    pub access: String,
    /// Longer-lived credential used solely to mint new access tokens.
    pub refresh: String,
    /// Profile of the authenticated user.
    pub user: UserProfile,
    /// Informational message from the server.
    #[serde(default)]
    pub message: Option<String>,
}

/// Lockout payload carried on a 403 login response with `locked: true`.
///
/// The unlock timestamp is present on attempts against an already-locked
/// account; the response that locks the account on the final failed
/// attempt may omit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockoutNotice {
    /// Human-readable reason shown to the user.
    pub error: String,
    /// Lockout flag, always `true` in this payload.
    #[serde(default)]
    pub locked: bool,
    /// Absolute unlock timestamp.
    #[serde(default)]
    pub locked_until: Option<DateTime<Utc>>,
    /// Server-computed minutes remaining, when included.
    #[serde(default)]
    pub minutes_remaining: Option<u32>,
    /// Server-computed seconds remaining, when included.
    #[serde(default)]
    pub seconds_remaining: Option<u32>,
}

/// Error payload on a rejected (non-lockout) login attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRejection {
    /// Human-readable reason.
    #[serde(default)]
    pub error: Option<String>,
    /// Failed attempts remaining before the account locks, when the
    /// server chooses to reveal it.
    #[serde(default)]
    pub attempts_remaining: Option<u32>,
}

/// Request body for the token renewal endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRefreshRequest {
    /// The refresh token being exchanged.
    pub refresh: String,
}

/// Response from the token renewal endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    /// The freshly minted access token.
    pub access: String,
}

/// Fields submitted to the registration endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation; must match `password`.
    pub password2: String,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request body for the password change endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    /// Current password.
    pub old_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// Advisory strength level reported by the strength-check endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak => write!(f, "weak"),
            Self::Medium => write!(f, "medium"),
            Self::Strong => write!(f, "strong"),
        }
    }
}

/// Advisory password strength report.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordStrength {
    /// Score from 0 to 5.
    pub score: u8,
    /// Overall level derived from the score.
    pub level: StrengthLevel,
    /// Suggestions for improving the password.
    #[serde(default)]
    pub feedback: Vec<String>,
    /// Whether the password contains an uppercase letter.
    #[serde(default)]
    pub has_uppercase: bool,
    /// Whether the password contains a lowercase letter.
    #[serde(default)]
    pub has_lowercase: bool,
    /// Whether the password contains a digit.
    #[serde(default)]
    pub has_digit: bool,
    /// Whether the password contains a special character.
    #[serde(default)]
    pub has_special: bool,
    /// Password length.
    #[serde(default)]
    pub length: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lockout_notice_with_deadline() {
        let json = r#"{
            "error": "Account is locked due to too many failed login attempts.",
            "locked": true,
            "locked_until": "2026-08-31T12:30:00Z",
            "minutes_remaining": 29,
            "seconds_remaining": 59
        }"#;
        let notice: LockoutNotice = serde_json::from_str(json).expect("deserialize");
        assert!(notice.locked);
        assert!(notice.locked_until.is_some());
        assert_eq!(notice.minutes_remaining, Some(29));
    }

    #[test]
    fn test_lockout_notice_without_deadline() {
        // Shape of the response that locks the account on the final attempt.
        let json = r#"{"error": "Account locked. Please try again in 30 minutes.", "locked": true}"#;
        let notice: LockoutNotice = serde_json::from_str(json).expect("deserialize");
        assert!(notice.locked);
        assert!(notice.locked_until.is_none());
    }

    #[test]
    fn test_rejection_attempts_remaining() {
        let json = r#"{"error": "Invalid credentials. 2 attempts remaining.", "attempts_remaining": 2}"#;
        let rejection: LoginRejection = serde_json::from_str(json).expect("deserialize");
        assert_eq!(rejection.attempts_remaining, Some(2));
    }

    #[test]
    fn test_strength_level_parses() {
        let json = r#"{"score": 5, "level": "strong", "feedback": []}"#;
        let strength: PasswordStrength = serde_json::from_str(json).expect("deserialize");
        assert_eq!(strength.level, StrengthLevel::Strong);
    }
}
