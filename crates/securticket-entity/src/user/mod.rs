//! User profile types.

pub mod role;

use serde::{Deserialize, Serialize};

pub use role::UserRole;

/// A user profile as returned by the API.
///
/// Owned by the session once stored; the client never mutates fields
/// directly, a profile-update call replaces the stored copy wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Numeric user ID.
    pub id: i64,
    /// Unique username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Role assigned by the server.
    pub role: UserRole,
    /// Account creation timestamp, if the endpoint includes it.
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserProfile {
    /// Full display name, falling back to the username when empty.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Fields accepted by the profile-update endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(first: &str, last: &str) -> UserProfile {
        UserProfile {
            id: 1,
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            first_name: first.into(),
            last_name: last.into(),
            phone: None,
            role: UserRole::Customer,
            created_at: None,
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(profile("Jane", "Doe").display_name(), "Jane Doe");
        assert_eq!(profile("", "").display_name(), "jdoe");
    }

    #[test]
    fn test_profile_deserializes_without_optional_fields() {
        let json = r#"{
            "id": 7,
            "username": "alice",
            "email": "alice@example.com",
            "role": "customer"
        }"#;
        let p: UserProfile = serde_json::from_str(json).expect("deserialize");
        assert_eq!(p.id, 7);
        assert_eq!(p.role, UserRole::Customer);
        assert!(p.first_name.is_empty());
    }
}
