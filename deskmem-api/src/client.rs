use std::fmt;
use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use time::Date;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::credentials::CredentialStore;
use crate::error::{ApiError, ErrorBody};
use crate::models::{
    Ack, Activity, ActivityQuery, AuthCheck, DailyReport, FailedScreenshot, HourlyReport,
    LoginResponse, Page, Screenshot, ScreenshotQuery, SearchHit, TodayStats,
};
use crate::redirect::Redirect;
use crate::session::Session;
use crate::timezone;

/// Endpoints whose 401 means "bad credentials" rather than "session gone".
const AUTH_PATHS: [&str; 2] = ["/auth/login", "/auth/check"];

/// What goes along with a request besides the bearer token.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    #[default]
    Empty,
    Query(Vec<(&'static str, String)>),
    Json(serde_json::Value),
}

/// HTTP client for the desktop-memory API.
///
/// Every request carries the stored token as a bearer credential. A 401 from
/// anything but the auth endpoints clears the token, expires the shared
/// [`Session`] and fires the login [`Redirect`] before the error reaches the
/// caller. Clones share the credential store, session and redirect hook.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    origin: String,
    credentials: Arc<dyn CredentialStore>,
    session: Session,
    redirect: Arc<dyn Redirect>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session.status())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialStore>,
        session: Session,
        redirect: Arc<dyn Redirect>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.normalized_base_url()?,
            origin: config.server_origin()?,
            credentials,
            session,
            redirect,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    /// Absolute URL of a server-relative resource such as
    /// `/files/thumbnails/thumb_x.png`.
    pub fn file_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.origin, path)
        } else {
            format!("{}/{}", self.origin, path)
        }
    }

    fn builder(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url);
        request = match payload {
            Payload::Empty => request,
            Payload::Query(params) => request.query(&params),
            Payload::Json(body) => request.json(&body),
        };
        if let Some(token) = self.credentials.get()? {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    /// Send `method path` with the stored token attached.
    ///
    /// Non-2xx replies become errors; their `detail` is kept when present.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<Response, ApiError> {
        debug!(%method, path, "API request");
        let response = self.builder(method, path, payload)?.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        let detail = ErrorBody::detail_from(&raw);

        if status == StatusCode::UNAUTHORIZED {
            if AUTH_PATHS.contains(&path) {
                return Err(ApiError::Unauthorized { detail });
            }
            self.force_logout(path);
            return Err(ApiError::SessionExpired);
        }

        Err(ApiError::Status { status, detail })
    }

    fn force_logout(&self, path: &str) {
        warn!(path, "Server rejected the session, returning to login");
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "Failed to clear stored token");
        }
        self.session.expire();
        self.redirect.to_login();
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Payload,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path, payload).await?;
        decode(response, path).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Payload,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path, payload).await?;
        decode(response, path).await
    }

    pub async fn check_auth(&self) -> Result<AuthCheck, ApiError> {
        self.get_json("/auth/check", Payload::Empty).await
    }

    pub async fn login(&self, password: &str) -> Result<LoginResponse, ApiError> {
        self.post_json(
            "/auth/login",
            Payload::Json(serde_json::json!({ "password": password })),
        )
        .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, "/auth/logout", Payload::Empty)
            .await?;
        let _ = response.bytes().await;
        Ok(())
    }

    pub async fn today_stats(&self) -> Result<TodayStats, ApiError> {
        self.get_json("/stats/today", Payload::Empty).await
    }

    pub async fn screenshots(&self, query: &ScreenshotQuery) -> Result<Page<Screenshot>, ApiError> {
        self.get_json("/screenshots", Payload::Query(query.to_params()))
            .await
    }

    pub async fn activities(&self, query: &ActivityQuery) -> Result<Page<Activity>, ApiError> {
        self.get_json("/activities", Payload::Query(query.to_params()))
            .await
    }

    /// Hourly reports for one UTC+8 day.
    pub async fn hourly_reports(&self, date: Date) -> Result<Page<HourlyReport>, ApiError> {
        self.get_json(
            "/reports/hourly",
            Payload::Query(vec![("date", timezone::iso_date(date))]),
        )
        .await
    }

    /// The most recent `limit` daily reports.
    pub async fn daily_reports(&self, limit: u32) -> Result<Page<DailyReport>, ApiError> {
        self.get_json(
            "/reports/daily",
            Payload::Query(vec![("limit", limit.to_string())]),
        )
        .await
    }

    pub async fn search(&self, query: &str, limit: u32) -> Result<Page<SearchHit>, ApiError> {
        self.get_json(
            "/search",
            Payload::Query(vec![("q", query.to_string()), ("limit", limit.to_string())]),
        )
        .await
    }

    /// Ask the server to analyze pending screenshots now.
    pub async fn trigger_analysis(&self) -> Result<Ack, ApiError> {
        self.post_json("/trigger-analysis", Payload::Empty).await
    }

    /// Reset the failure counter of screenshots whose analysis failed.
    pub async fn retry_failed(&self) -> Result<Ack, ApiError> {
        self.post_json("/retry-failed", Payload::Empty).await
    }

    pub async fn failed_screenshots(&self) -> Result<Page<FailedScreenshot>, ApiError> {
        self.get_json("/failed-screenshots", Payload::Empty).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
        call: path.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use time::macros::date;

    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use crate::redirect::LoginRedirect;
    use crate::session::AuthStatus;

    struct Fixture {
        client: ApiClient,
        store: MemoryCredentialStore,
        redirect: LoginRedirect,
    }

    fn fixture(url: &str, token: Option<&str>) -> Fixture {
        let store = token
            .map(MemoryCredentialStore::with_token)
            .unwrap_or_default();
        let redirect = LoginRedirect::new();
        let session = Session::new();
        session.mark_checked(true, token.is_some());
        let client = ApiClient::new(
            &ApiConfig::new(url),
            Arc::new(store.clone()),
            session,
            Arc::new(redirect.clone()),
        )
        .unwrap();
        Fixture {
            client,
            store,
            redirect,
        }
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let fx = fixture("http://localhost:8000/api/", None);
        assert_eq!(fx.client.base_url(), "http://localhost:8000/api");
    }

    const STATS: &str = r#"{"date": "2024-06-02", "screenshot_count": 12,
        "activity_count": 5, "analyzed_count": 5,
        "activity_distribution": {"work": 3, "study": 2}}"#;

    #[tokio::test]
    async fn stored_token_is_sent_as_bearer() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/stats/today")
            .match_header("authorization", "Bearer abc")
            .with_status(200)
            .with_body(STATS)
            .expect(1)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("abc"));
        let stats = f.client.today_stats().await.unwrap();

        assert_eq!(stats.screenshot_count, 12);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn no_token_means_no_authorization_header() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/stats/today")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(STATS)
            .expect(1)
            .create_async()
            .await;

        let f = fixture(&server.url(), None);
        f.client.today_stats().await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_data_call_clears_token_and_redirects_once() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/screenshots")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"detail": "Invalid token"}"#)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("abc"));
        let err = f
            .client
            .screenshots(&ScreenshotQuery::for_day(date!(2024 - 06 - 02), 0, 20))
            .await
            .unwrap_err();

        assert!(err.is_session_expired());
        assert_eq!(f.store.get().unwrap(), None);
        assert_eq!(f.redirect.count(), 1);
        assert_eq!(
            f.client.session().status(),
            AuthStatus::Checked {
                auth_enabled: true,
                authenticated: false
            }
        );
    }

    #[tokio::test]
    async fn unauthorized_login_is_passed_through() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"detail": "Wrong password"}"#)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("old"));
        let err = f.client.login("nope").await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Unauthorized { ref detail } if detail.as_deref() == Some("Wrong password")
        ));
        assert_eq!(f.store.get().unwrap().as_deref(), Some("old"));
        assert_eq!(f.redirect.count(), 0);
    }

    #[tokio::test]
    async fn unauthorized_check_is_passed_through() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/auth/check")
            .with_status(401)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("abc"));
        let err = f.client.check_auth().await.unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized { detail: None }));
        assert_eq!(f.store.get().unwrap().as_deref(), Some("abc"));
        assert_eq!(f.redirect.count(), 0);
    }

    #[tokio::test]
    async fn server_errors_keep_status_and_detail() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"detail": "index missing"}"#)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("abc"));
        let err = f.client.search("report", 20).await.unwrap_err();

        match err {
            ApiError::Status { status, detail } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(detail.as_deref(), Some("index missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(f.redirect.count(), 0);
        assert_eq!(f.store.get().unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn screenshot_query_sends_day_bounds() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/screenshots")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("skip".into(), "20".into()),
                Matcher::UrlEncoded("limit".into(), "20".into()),
                Matcher::UrlEncoded("start_date".into(), "2024-06-02T00:00:00+08:00".into()),
                Matcher::UrlEncoded("end_date".into(), "2024-06-02T23:59:59+08:00".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"items": [], "total": 25}"#)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("abc"));
        let page = f
            .client
            .screenshots(&ScreenshotQuery::for_day(date!(2024 - 06 - 02), 1, 20))
            .await
            .unwrap();

        assert_eq!(page.total, Some(25));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn search_sends_query_and_limit() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "weekly report".into()),
                Matcher::UrlEncoded("limit".into(), "20".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"query": "weekly report", "total": 1, "items": [{"id": 4,
                "description": "Writing weekly report", "timestamp": "2024-06-02T09:15:00",
                "relevance": "semantic", "score": 0.82}]}"#,
            )
            .create_async()
            .await;

        let f = fixture(&server.url(), None);
        let hits = f.client.search("weekly report", 20).await.unwrap();

        assert_eq!(hits.items.len(), 1);
        assert_eq!(hits.items[0].score_percent(), Some(82));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn report_queries_use_date_and_limit() {
        let mut server = Server::new_async().await;
        let hourly = server
            .mock("GET", "/reports/hourly")
            .match_query(Matcher::UrlEncoded("date".into(), "2024-06-02".into()))
            .with_status(200)
            .with_body(r#"{"total": 0, "items": []}"#)
            .create_async()
            .await;
        let daily = server
            .mock("GET", "/reports/daily")
            .match_query(Matcher::UrlEncoded("limit".into(), "7".into()))
            .with_status(200)
            .with_body(r#"{"total": 0, "items": []}"#)
            .create_async()
            .await;

        let f = fixture(&server.url(), None);
        f.client.hourly_reports(date!(2024 - 06 - 02)).await.unwrap();
        f.client.daily_reports(7).await.unwrap();

        hourly.assert_async().await;
        daily.assert_async().await;
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/stats/today")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let f = fixture(&server.url(), None);
        let err = f.client.today_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { ref call, .. } if call == "/stats/today"));
    }

    #[tokio::test]
    async fn maintenance_calls_post_and_parse_ack() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/trigger-analysis")
            .match_header("authorization", "Bearer abc")
            .with_status(200)
            .with_body(r#"{"success": true, "message": "Analysis started"}"#)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("abc"));
        let ack = f.client.trigger_analysis().await.unwrap();

        assert!(ack.success);
        assert_eq!(ack.message.as_deref(), Some("Analysis started"));
        m.assert_async().await;
    }

    #[test]
    fn file_url_resolves_against_origin() {
        let f = fixture("http://localhost:8000/api", None);
        assert_eq!(
            f.client.file_url("/files/thumbnails/thumb_x.png"),
            "http://localhost:8000/files/thumbnails/thumb_x.png"
        );
        assert_eq!(
            f.client.file_url("files/x.png"),
            "http://localhost:8000/files/x.png"
        );
        assert_eq!(
            f.client.file_url("https://cdn.example.com/x.png"),
            "https://cdn.example.com/x.png"
        );
    }
}
