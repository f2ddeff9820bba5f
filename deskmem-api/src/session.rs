//! Authentication state shared by the client and the views.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::{login_failed_fallback, ApiError};
use crate::routing::{self, Resolution, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// The startup check has not resolved yet.
    #[default]
    Unknown,
    Checked {
        auth_enabled: bool,
        authenticated: bool,
    },
}

impl AuthStatus {
    pub fn auth_enabled(self) -> bool {
        match self {
            AuthStatus::Unknown => true,
            AuthStatus::Checked { auth_enabled, .. } => auth_enabled,
        }
    }

    pub fn main_reachable(self) -> bool {
        matches!(
            self,
            AuthStatus::Checked {
                auth_enabled: false,
                ..
            } | AuthStatus::Checked {
                authenticated: true,
                ..
            }
        )
    }
}

/// Cloneable handle to the process-wide auth state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: Arc<Mutex<AuthStatus>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AuthStatus> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> AuthStatus {
        *self.lock()
    }

    pub fn auth_enabled(&self) -> bool {
        self.status().auth_enabled()
    }

    pub fn mark_checked(&self, auth_enabled: bool, authenticated: bool) {
        *self.lock() = AuthStatus::Checked {
            auth_enabled,
            authenticated,
        };
    }

    pub fn mark_authenticated(&self) {
        let mut state = self.lock();
        *state = AuthStatus::Checked {
            auth_enabled: state.auth_enabled(),
            authenticated: true,
        };
    }

    /// Drop back to unauthenticated, keeping the auth-enabled flag.
    pub fn expire(&self) {
        let mut state = self.lock();
        *state = AuthStatus::Checked {
            auth_enabled: state.auth_enabled(),
            authenticated: false,
        };
    }

    pub fn resolve(&self, requested: Route) -> Resolution {
        routing::resolve(self.status(), requested)
    }
}

/// Drives the session through startup, login and logout.
#[derive(Clone)]
pub struct SessionController {
    client: ApiClient,
}

impl SessionController {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    pub fn status(&self) -> AuthStatus {
        self.session().status()
    }

    pub fn resolve(&self, requested: Route) -> Resolution {
        self.session().resolve(requested)
    }

    /// Ask the server whether auth is enabled and settle the session.
    ///
    /// Any failure leaves the session closed: auth enabled, not
    /// authenticated.
    pub async fn start(&self) -> AuthStatus {
        let session = self.session();
        match self.client.check_auth().await {
            Ok(check) if !check.auth_enabled => session.mark_checked(false, true),
            Ok(_) => {
                let has_token = match self.client.credentials().get() {
                    Ok(token) => token.is_some(),
                    Err(e) => {
                        warn!(error = %e, "Failed to read stored token");
                        false
                    }
                };
                session.mark_checked(true, has_token);
            }
            Err(e) => {
                warn!(error = %e, "Auth check failed, requiring login");
                session.mark_checked(true, false);
            }
        }

        let status = session.status();
        info!(?status, "Session resolved");
        status
    }

    /// Exchange the password for a token.
    ///
    /// On failure the error's [`ApiError::login_message`] is the text to show
    /// next to the form.
    pub async fn login(&self, password: &str) -> Result<(), ApiError> {
        let reply = self.client.login(password).await?;
        if !reply.success {
            return Err(ApiError::Unauthorized {
                detail: Some(
                    reply
                        .message
                        .unwrap_or_else(|| login_failed_fallback().to_string()),
                ),
            });
        }

        if let Some(token) = reply.token.as_deref() {
            self.client.credentials().set(token)?;
        }
        self.session().mark_authenticated();
        info!("Logged in");
        Ok(())
    }

    /// Sign out locally. The server call is best effort.
    pub async fn logout(&self) {
        if let Err(e) = self.client.logout().await {
            warn!(error = %e, "Logout request failed, clearing local session anyway");
        }
        if let Err(e) = self.client.credentials().clear() {
            warn!(error = %e, "Failed to remove stored token");
        }
        self.session().expire();
        info!("Logged out");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockito::{Matcher, Server};

    use super::*;
    use crate::config::ApiConfig;
    use crate::credentials::{CredentialStore, MemoryCredentialStore};
    use crate::redirect::LoginRedirect;

    fn controller(url: &str, store: &MemoryCredentialStore) -> (SessionController, LoginRedirect) {
        let redirect = LoginRedirect::new();
        let client = ApiClient::new(
            &ApiConfig::new(url),
            Arc::new(store.clone()),
            Session::new(),
            Arc::new(redirect.clone()),
        )
        .unwrap();
        (SessionController::new(client), redirect)
    }

    #[test]
    fn expire_keeps_auth_flag() {
        let session = Session::new();
        session.mark_checked(true, true);
        session.expire();
        assert_eq!(
            session.status(),
            AuthStatus::Checked {
                auth_enabled: true,
                authenticated: false
            }
        );
    }

    #[test]
    fn clones_share_state() {
        let session = Session::new();
        let other = session.clone();
        other.mark_checked(false, true);
        assert!(session.status().main_reachable());
    }

    #[tokio::test]
    async fn start_with_auth_disabled_opens_main_app() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/auth/check")
            .with_status(200)
            .with_body(r#"{"auth_enabled": false, "authenticated": true}"#)
            .create_async()
            .await;

        let store = MemoryCredentialStore::new();
        let (controller, _) = controller(&server.url(), &store);

        assert_eq!(
            controller.start().await,
            AuthStatus::Checked {
                auth_enabled: false,
                authenticated: true
            }
        );
        assert_eq!(
            controller.resolve(Route::Login),
            Resolution::Redirect(Route::Dashboard)
        );
        assert_eq!(
            controller.resolve(Route::Search),
            Resolution::Show(Route::Search)
        );
        m.assert_async().await;
    }

    #[tokio::test]
    async fn start_with_stored_token_is_authenticated() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/auth/check")
            .with_status(200)
            .with_body(r#"{"auth_enabled": true, "authenticated": true}"#)
            .create_async()
            .await;

        let store = MemoryCredentialStore::with_token("abc");
        let (controller, _) = controller(&server.url(), &store);

        assert!(controller.start().await.main_reachable());
    }

    #[tokio::test]
    async fn start_without_token_requires_login() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/auth/check")
            .with_status(200)
            .with_body(r#"{"auth_enabled": true}"#)
            .create_async()
            .await;

        let store = MemoryCredentialStore::new();
        let (controller, _) = controller(&server.url(), &store);
        controller.start().await;

        for route in Route::MAIN {
            assert_eq!(
                controller.resolve(route),
                Resolution::Redirect(Route::Login)
            );
        }
        assert_eq!(
            controller.resolve(Route::Login),
            Resolution::Show(Route::Login)
        );
    }

    #[tokio::test]
    async fn start_fails_closed_on_server_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/auth/check")
            .with_status(500)
            .create_async()
            .await;

        let store = MemoryCredentialStore::with_token("abc");
        let (controller, redirect) = controller(&server.url(), &store);

        assert_eq!(
            controller.start().await,
            AuthStatus::Checked {
                auth_enabled: true,
                authenticated: false
            }
        );
        assert_eq!(redirect.count(), 0);
    }

    #[tokio::test]
    async fn login_success_stores_token() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/login")
            .match_body(Matcher::Json(serde_json::json!({"password": "correct"})))
            .with_status(200)
            .with_body(r#"{"success": true, "token": "abc", "message": "ok"}"#)
            .create_async()
            .await;

        let store = MemoryCredentialStore::new();
        let (controller, _) = controller(&server.url(), &store);
        controller.session().mark_checked(true, false);

        controller.login("correct").await.unwrap();

        assert_eq!(store.get().unwrap().as_deref(), Some("abc"));
        assert_eq!(
            controller.resolve(Route::Dashboard),
            Resolution::Show(Route::Dashboard)
        );
        m.assert_async().await;
    }

    #[tokio::test]
    async fn login_rejection_carries_server_detail() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"detail": "Wrong password"}"#)
            .create_async()
            .await;

        let store = MemoryCredentialStore::new();
        let (controller, redirect) = controller(&server.url(), &store);
        controller.session().mark_checked(true, false);

        let err = controller.login("nope").await.unwrap_err();

        assert_eq!(err.login_message(), "Wrong password");
        assert!(!controller.status().main_reachable());
        assert_eq!(redirect.count(), 0);
    }

    #[tokio::test]
    async fn unsuccessful_reply_is_a_failure() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(r#"{"success": false}"#)
            .create_async()
            .await;

        let store = MemoryCredentialStore::new();
        let (controller, _) = controller(&server.url(), &store);
        controller.session().mark_checked(true, false);

        let err = controller.login("nope").await.unwrap_err();

        assert_eq!(err.login_message(), login_failed_fallback());
        assert_eq!(store.get().unwrap(), None);
    }

    #[tokio::test]
    async fn logout_clears_token_even_when_server_fails() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/logout")
            .match_header("authorization", "Bearer abc")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let store = MemoryCredentialStore::with_token("abc");
        let (controller, _) = controller(&server.url(), &store);
        controller.session().mark_checked(true, true);

        controller.logout().await;

        assert_eq!(store.get().unwrap(), None);
        assert_eq!(
            controller.resolve(Route::Timeline),
            Resolution::Redirect(Route::Login)
        );
        m.assert_async().await;
    }
}
