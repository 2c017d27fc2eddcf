//! JSON request and response shapes for the admin API.

use serde::{Deserialize, Serialize};

/// Generic `{success, message}` envelope. Validation and credential
/// failures use it with `success: false` and an HTTP 200; the frontend
/// branches on the flag, not the status code.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Response for a successful client insert.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
    pub message: String,
}

/// Response for the public credentials read.
#[derive(Debug, Serialize)]
pub struct CredentialsResponse {
    pub success: bool,
    pub username: String,
    /// Placeholder length shown by the settings form, not the stored length.
    #[serde(rename = "passwordLength")]
    pub password_length: u32,
}

/// Error shape for a missing client.
#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub error: &'static str,
}

/// Body of `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /api/admin/change-credentials`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeCredentialsRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_username: String,
    #[serde(default)]
    pub new_password: String,
}
