use std::time::Duration;

use reqwest::Url;

use crate::ApiError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Path segment under which the backend mounts its API routes.
const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every API path is appended to, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without trailing slashes, validated.
    pub fn normalized_base_url(&self) -> Result<String, ApiError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        Url::parse(trimmed)?;
        Ok(trimmed.to_string())
    }

    /// Origin static files are served from: the base URL with a trailing
    /// `/api` segment removed.
    pub fn server_origin(&self) -> Result<String, ApiError> {
        let base = self.normalized_base_url()?;
        Ok(base
            .strip_suffix(API_PREFIX)
            .map(str::to_string)
            .unwrap_or(base))
    }
}
