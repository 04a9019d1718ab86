// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A wiremock-backed console backend.
//!
//! Wraps a [`MockServer`] with mount helpers for the endpoints the client
//! talks to, so integration tests read as scenario setup rather than mock
//! plumbing. Helpers serialize the typed fixtures through the same serde
//! definitions the client deserializes with.

use kontor_model::{Department, Menu, Role, UserProfile};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock console backend for integration tests.
pub struct MockBackend {
    server: MockServer,
}

impl MockBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to point a gateway at.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// The underlying server, for custom mounts and request inspection.
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Serves a fixed captcha challenge on every `GET /captcha`.
    pub async fn serve_captcha(&self, challenge_id: &str) {
        Mock::given(method("GET"))
            .and(path("/captcha"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "challengeId": challenge_id,
                "imageBase64": "iVBORw0KGgo="
            })))
            .mount(&self.server)
            .await;
    }

    /// Accepts any `POST /login` with the given token.
    pub async fn serve_login_success(&self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
            .mount(&self.server)
            .await;
    }

    /// Rejects every `POST /login` with the given message.
    pub async fn serve_login_rejection(&self, message: &str) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": message })),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn serve_profile(&self, profile: &UserProfile) {
        Mock::given(method("GET"))
            .and(path("/currentUser"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile))
            .mount(&self.server)
            .await;
    }

    pub async fn serve_menus(&self, menus: &[Menu]) {
        Mock::given(method("GET"))
            .and(path("/menus/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(menus))
            .mount(&self.server)
            .await;
    }

    pub async fn serve_departments(&self, departments: &[Department]) {
        Mock::given(method("GET"))
            .and(path("/departments/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(departments))
            .mount(&self.server)
            .await;
    }

    pub async fn serve_roles(&self, roles: &[Role]) {
        Mock::given(method("GET"))
            .and(path("/roles/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(roles))
            .mount(&self.server)
            .await;
    }

    /// Accepts menu grant replacement for the given role id.
    pub async fn serve_grant_ok(&self, role_id: i64) {
        Mock::given(method("POST"))
            .and(path(format!("/roles/{role_id}/menus")))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Accepts deletion of the given menu id.
    pub async fn serve_delete_ok(&self, menu_id: i64) {
        Mock::given(method("DELETE"))
            .and(path(format!("/menus/{menu_id}")))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Refuses deletion of the given menu id with a conflict.
    pub async fn serve_delete_conflict(&self, menu_id: i64, message: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/menus/{menu_id}")))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({ "message": message })),
            )
            .mount(&self.server)
            .await;
    }

    /// Acknowledges `POST /logout`.
    pub async fn serve_logout_ok(&self) {
        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Answers every listed path with 401, simulating a revoked token.
    pub async fn revoke_token(&self) {
        for p in ["/currentUser", "/menus/list", "/departments/list", "/roles/list"] {
            Mock::given(method("GET"))
                .and(path(p))
                .respond_with(
                    ResponseTemplate::new(401)
                        .set_body_json(json!({ "message": "token expired" })),
                )
                .mount(&self.server)
                .await;
        }
    }
}
