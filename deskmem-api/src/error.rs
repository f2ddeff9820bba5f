use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::credentials::CredentialStoreError;

const LOGIN_FAILED: &str = "Login failed, check the password";

#[derive(Error, Debug)]
pub enum ApiError {
    /// 401 from the login or check endpoint, passed through untouched.
    #[error("Unauthorized{}", detail_suffix(.detail))]
    Unauthorized { detail: Option<String> },
    /// 401 from any other endpoint. The stored token has been cleared and the
    /// login redirect has fired by the time the caller sees this.
    #[error("Session expired")]
    SessionExpired,
    #[error("Server returned {status}{}", detail_suffix(.detail))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to parse {call} response: {message}")]
    Decode { call: String, message: String },
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Credential store: {0}")]
    Credentials(#[from] CredentialStoreError),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

impl ApiError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }

    /// The server-provided `detail`, when the error carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Status { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    /// Text shown to the user after a failed login attempt.
    pub fn login_message(&self) -> String {
        self.detail().unwrap_or(LOGIN_FAILED).to_string()
    }

    /// Short status-line text for a failed data load.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::SessionExpired => "Session expired, please log in again".to_string(),
            ApiError::Transport(e) if e.is_timeout() => "Request timed out".to_string(),
            ApiError::Transport(e) if e.is_connect() => "Cannot reach the server".to_string(),
            ApiError::Status { status, detail } => match detail {
                Some(d) => format!("Server error ({}): {d}", status.as_u16()),
                None => format!("Server error ({})", status.as_u16()),
            },
            other => other.to_string(),
        }
    }
}

pub(crate) fn login_failed_fallback() -> &'static str {
    LOGIN_FAILED
}

/// Error body shape used by the backend: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Extract a readable detail from a raw body. Validation errors carry a
    /// structured `detail`, which is rendered as JSON.
    pub(crate) fn detail_from(raw: &str) -> Option<String> {
        let body: ErrorBody = serde_json::from_str(raw).ok()?;
        match body.detail? {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
