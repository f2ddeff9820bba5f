use anyhow::{Context, Result};
use deskmem_api::{ApiClient, FileCredentialStore, LoginRedirect, Session, SessionController};
use std::sync::Arc;

use crate::config::TuiConfig;

/// Wire the API client, token file, session and login redirect together.
pub fn build_controller(config: &TuiConfig) -> Result<(SessionController, LoginRedirect)> {
    let store = FileCredentialStore::in_config_dir().context("Failed to locate token file")?;
    let redirect = LoginRedirect::new();
    let client = ApiClient::new(
        &config.api_config(),
        Arc::new(store),
        Session::new(),
        Arc::new(redirect.clone()),
    )
    .with_context(|| format!("Invalid API URL: {}", config.api_url))?;
    Ok((SessionController::new(client), redirect))
}
