// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the console backend.
//!
//! Provides [`Gateway`] which handles request construction, bearer token
//! injection, and status-to-error mapping. A 401 or 403 on a protected
//! request clears the session before the error is returned, so every handle
//! on the [`SessionStore`] observes the forced logout.

use std::time::Duration;

use kontor_core::{KontorError, NodeId, RoleId};
use kontor_model::{
    CaptchaChallenge, Department, ErrorBody, LoginRequest, LoginResponse, Menu, MenuGrantRequest,
    Role, UserProfile,
};
use kontor_session::SessionStore;
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// How a non-success status is interpreted.
///
/// The login exchange is the one endpoint where a credential rejection must
/// not touch the session: the operator is anonymous and stays anonymous.
/// Everywhere else a rejected token is a global event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorMode {
    Login,
    Protected,
}

/// HTTP gateway for console backend communication.
///
/// Cheap to clone; the underlying connection pool and session handle are
/// shared. Requests are issued one at a time by caller action, never queued
/// or retried automatically.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl Gateway {
    /// Creates a gateway against `base_url` with a fixed per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: SessionStore,
    ) -> Result<Self, KontorError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| KontorError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The session handle this gateway decorates requests from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Fetches a fresh captcha challenge. Each challenge is single-use.
    pub async fn captcha(&self) -> Result<CaptchaChallenge, KontorError> {
        self.get_json("/captcha", ErrorMode::Login).await
    }

    /// Exchanges credentials plus a captcha answer for a bearer token.
    ///
    /// Rejections map to [`KontorError::Authentication`]; the caller owns the
    /// session transition and the mandatory captcha rotation.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, KontorError> {
        let req = self.http.post(self.url("/login")).json(request);
        let resp = self.send(req).await?;
        self.decode(resp, ErrorMode::Login).await
    }

    /// Fetches the authenticated user's profile.
    pub async fn current_user(&self) -> Result<UserProfile, KontorError> {
        self.get_json("/currentUser", ErrorMode::Protected).await
    }

    /// Fetches the full flat menu list.
    pub async fn menu_list(&self) -> Result<Vec<Menu>, KontorError> {
        self.get_json("/menus/list", ErrorMode::Protected).await
    }

    /// Fetches the full flat department list.
    pub async fn department_list(&self) -> Result<Vec<Department>, KontorError> {
        self.get_json("/departments/list", ErrorMode::Protected)
            .await
    }

    /// Fetches all roles.
    pub async fn role_list(&self) -> Result<Vec<Role>, KontorError> {
        self.get_json("/roles/list", ErrorMode::Protected).await
    }

    /// Replaces a role's menu grants with exactly the submitted set.
    ///
    /// The backend treats the payload as authoritative: ids absent from it
    /// are revoked.
    pub async fn grant_menus(
        &self,
        role_id: RoleId,
        grant: &MenuGrantRequest,
    ) -> Result<(), KontorError> {
        let req = self
            .http
            .post(self.url(&format!("/roles/{role_id}/menus")))
            .json(grant);
        let resp = self.send(self.authorize(req)).await?;
        self.decode_empty(resp).await
    }

    /// Deletes a single menu node.
    ///
    /// The backend refuses with a conflict when the node still has children;
    /// that refusal surfaces as [`KontorError::Conflict`].
    pub async fn delete_menu(&self, id: NodeId) -> Result<(), KontorError> {
        let req = self.http.delete(self.url(&format!("/menus/{id}")));
        let resp = self.send(self.authorize(req)).await?;
        self.decode_empty(resp).await
    }

    /// Logs out: best-effort server notification, then unconditional local
    /// clear. A failed notification never leaves the session behind.
    pub async fn logout(&self) {
        let req = self.authorize(self.http.post(self.url("/logout")));
        match self.send(req).await {
            Ok(resp) if resp.status().is_success() => {
                debug!("server acknowledged logout");
            }
            Ok(resp) => {
                debug!(status = %resp.status(), "server rejected logout, clearing locally");
            }
            Err(err) => {
                debug!(error = %err, "logout notification failed, clearing locally");
            }
        }
        self.session.clear();
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        mode: ErrorMode,
    ) -> Result<T, KontorError> {
        let req = self.authorize(self.http.get(self.url(path)));
        let resp = self.send(req).await?;
        self.decode(resp, mode).await
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, KontorError> {
        req.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else {
                format!("request failed: {e}")
            };
            KontorError::Transport {
                message,
                source: Some(Box::new(e)),
            }
        })
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        resp: Response,
        mode: ErrorMode,
    ) -> Result<T, KontorError> {
        let status = resp.status();
        if status.is_success() {
            return resp
                .json()
                .await
                .map_err(|e| KontorError::Internal(format!("malformed response body: {e}")));
        }
        let body = resp.text().await.unwrap_or_default();
        Err(self.classify(status, &body, mode))
    }

    async fn decode_empty(&self, resp: Response) -> Result<(), KontorError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(self.classify(status, &body, ErrorMode::Protected))
    }

    /// Maps a non-success status to the shared error taxonomy.
    ///
    /// Protected mode treats 401 and 403 identically: the token no longer
    /// grants access, so the session is cleared here regardless of which
    /// caller issued the request.
    fn classify(&self, status: StatusCode, body: &str, mode: ErrorMode) -> KontorError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    body.trim().to_string()
                }
            });

        if status.is_server_error() {
            return KontorError::Server {
                status: status.as_u16(),
                message,
            };
        }

        match (mode, status) {
            (ErrorMode::Login, _) => KontorError::Authentication { message },
            (ErrorMode::Protected, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                warn!(status = %status, "token rejected, clearing session");
                self.session.clear();
                KontorError::Authorization { message }
            }
            (ErrorMode::Protected, StatusCode::NOT_FOUND) => KontorError::NotFound { message },
            (ErrorMode::Protected, StatusCode::CONFLICT) => KontorError::Conflict { message },
            (ErrorMode::Protected, _) => {
                KontorError::Internal(format!("unexpected status {status}: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use kontor_session::SessionState;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::open(dir.path().join("session.json"), ChronoDuration::days(7))
    }

    fn authed_store(dir: &tempfile::TempDir, token: &str) -> SessionStore {
        let session = store(dir);
        session.begin_login().unwrap();
        session.establish(token).unwrap();
        session
    }

    fn gateway(server: &MockServer, session: SessionStore) -> Gateway {
        Gateway::new(server.uri(), Duration::from_secs(5), session).unwrap()
    }

    #[tokio::test]
    async fn bearer_token_is_injected_on_protected_requests() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let session = authed_store(&dir, "tok-abc");

        Mock::given(method("GET"))
            .and(path("/menus/list"))
            .and(header("authorization", "Bearer tok-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let menus = gateway(&server, session).menu_list().await.unwrap();
        assert!(menus.is_empty());
    }

    #[tokio::test]
    async fn anonymous_requests_carry_no_authorization_header() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/captcha"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "challengeId": "c-1",
                "imageBase64": "iVBOR"
            })))
            .mount(&server)
            .await;

        let challenge = gateway(&server, store(&dir)).captcha().await.unwrap();
        assert_eq!(challenge.challenge_id, "c-1");

        let received = server.received_requests().await.unwrap();
        assert!(!received[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn unauthorized_response_clears_session() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let session = authed_store(&dir, "stale");

        Mock::given(method("GET"))
            .and(path("/currentUser"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "token expired" })),
            )
            .mount(&server)
            .await;

        let gw = gateway(&server, session.clone());
        let err = gw.current_user().await.unwrap_err();
        assert!(matches!(err, KontorError::Authorization { ref message } if message == "token expired"));
        assert!(err.invalidates_session());
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(!dir.path().join("session.json").exists());
    }

    #[tokio::test]
    async fn forbidden_is_treated_like_unauthorized() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let session = authed_store(&dir, "tok");

        Mock::given(method("GET"))
            .and(path("/roles/list"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = gateway(&server, session.clone())
            .role_list()
            .await
            .unwrap_err();
        assert!(matches!(err, KontorError::Authorization { .. }));
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn login_rejection_maps_to_authentication_and_keeps_session_alone() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let session = store(&dir);

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "bad captcha" })),
            )
            .mount(&server)
            .await;

        let request = LoginRequest {
            username: "admin".into(),
            password: "pw".into(),
            captcha_response: "7".into(),
            challenge_id: "c-1".into(),
        };
        let err = gateway(&server, session.clone())
            .login(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, KontorError::Authentication { ref message } if message == "bad captcha"));
        assert!(!err.invalidates_session());
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn not_found_and_conflict_map_to_their_kinds() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let session = authed_store(&dir, "tok");

        Mock::given(method("DELETE"))
            .and(path("/menus/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "no such menu" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/menus/1"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({ "message": "menu still has children" })),
            )
            .mount(&server)
            .await;

        let gw = gateway(&server, session.clone());
        assert!(matches!(
            gw.delete_menu(NodeId(99)).await.unwrap_err(),
            KontorError::NotFound { .. }
        ));
        assert!(matches!(
            gw.delete_menu(NodeId(1)).await.unwrap_err(),
            KontorError::Conflict { .. }
        ));
        // Neither failure is an authorization event.
        assert_eq!(session.state(), SessionState::Authenticated);
    }

    #[tokio::test]
    async fn server_errors_surface_status_and_are_retryable() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let session = authed_store(&dir, "tok");

        Mock::given(method("GET"))
            .and(path("/menus/list"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = gateway(&server, session.clone())
            .menu_list()
            .await
            .unwrap_err();
        assert!(matches!(err, KontorError::Server { status: 503, .. }));
        assert!(err.is_retryable());
        assert_eq!(session.state(), SessionState::Authenticated);
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        let dir = tempfile::tempdir().unwrap();
        let session = authed_store(&dir, "tok");
        // Reserved port with nothing listening.
        let gw = Gateway::new("http://127.0.0.1:1", Duration::from_secs(1), session.clone())
            .unwrap();

        let err = gw.menu_list().await.unwrap_err();
        assert!(matches!(err, KontorError::Transport { .. }));
        assert!(err.is_retryable());
        assert_eq!(session.state(), SessionState::Authenticated);
    }

    #[tokio::test]
    async fn grant_menus_posts_the_full_replacement_set() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let session = authed_store(&dir, "tok");

        Mock::given(method("POST"))
            .and(path("/roles/3/menus"))
            .and(body_json(json!({ "menuIds": [1, 2, 5] })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let grant = MenuGrantRequest {
            menu_ids: vec![NodeId(1), NodeId(2), NodeId(5)],
        };
        gateway(&server, session)
            .grant_menus(RoleId(3), &grant)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn menu_list_deserializes_backend_records() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let session = authed_store(&dir, "tok");

        Mock::given(method("GET"))
            .and(path("/menus/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "menuId": 1, "parentId": 0, "menuName": "System",
                    "orderNum": 1, "menuType": "M", "visible": "0", "status": "0"
                },
                {
                    "menuId": 100, "parentId": 1, "menuName": "Users",
                    "orderNum": 1, "menuType": "C", "path": "user",
                    "visible": "0", "status": "0"
                }
            ])))
            .mount(&server)
            .await;

        let menus = gateway(&server, session).menu_list().await.unwrap();
        assert_eq!(menus.len(), 2);
        assert_eq!(menus[0].menu_name, "System");
        assert_eq!(menus[1].parent_id, NodeId(1));
    }

    #[tokio::test]
    async fn logout_clears_session_even_when_server_fails() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let session = authed_store(&dir, "tok");

        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        gateway(&server, session.clone()).logout().await;
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn error_without_json_body_falls_back_to_status_reason() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let session = authed_store(&dir, "tok");

        Mock::given(method("GET"))
            .and(path("/departments/list"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&server)
            .await;

        let err = gateway(&server, session)
            .department_list()
            .await
            .unwrap_err();
        assert!(matches!(err, KontorError::NotFound { ref message } if message == "gone"));
    }
}
