//! Session and auth endpoint types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Server-assigned user ID.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address (login identifier).
    pub email: String,
    /// Phone number, if provided.
    #[serde(default)]
    pub phone: Option<String>,
    /// Date of birth, if provided.
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    /// When the account was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Email address.
    pub email: String,
    /// Password, sent to the auth endpoint and never stored.
    pub password: String,
}

/// Registration payload. Successful registration auto-authenticates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number, if provided.
    #[serde(default)]
    pub phone: Option<String>,
    /// Date of birth, if provided.
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    /// Password.
    pub password: String,
}

/// Response shape shared by the login and register endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Whether authentication succeeded.
    pub success: bool,
    /// Server-provided message, surfaced to the user on failure.
    pub message: String,
    /// Opaque auth token, present only on success.
    #[serde(default)]
    pub token: Option<String>,
    /// The authenticated identity, present only on success.
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Response of the forgot-password endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    /// Whether the request was accepted.
    pub success: bool,
    /// Message to display.
    pub message: String,
    /// Reset token, present only in non-production deployments.
    #[serde(default)]
    pub reset_token: Option<String>,
}

/// Response of the reset-password endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
    /// Whether the reset succeeded.
    pub success: bool,
    /// Message to display.
    pub message: String,
}
