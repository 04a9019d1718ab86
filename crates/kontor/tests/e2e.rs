// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete Kontor pipeline.
//!
//! Each test creates an isolated mock backend and a temp session file, then
//! drives the same crates the binary wires together. Tests are independent
//! and order-insensitive.

use std::time::Duration;

use kontor_client::{FetchSequence, Gateway, LoginFlow};
use kontor_core::{KontorError, NodeId, RoleId};
use kontor_model::MenuGrantRequest;
use kontor_rbac::{CascadePolicy, PermissionSet};
use kontor_session::{SessionState, SessionStore};
use kontor_test_utils::{fixtures, MockBackend};
use kontor_tree::{build_tree, flatten_for_table};

fn session_in(dir: &tempfile::TempDir) -> SessionStore {
    SessionStore::open(dir.path().join("session.json"), chrono::Duration::days(7))
}

fn gateway(backend: &MockBackend, session: SessionStore) -> Gateway {
    Gateway::new(backend.uri(), Duration::from_secs(5), session).unwrap()
}

async fn logged_in(backend: &MockBackend, dir: &tempfile::TempDir) -> Gateway {
    backend.serve_captcha("c-1").await;
    backend.serve_login_success("tok-e2e").await;
    backend.serve_profile(&fixtures::admin_profile()).await;

    let gw = gateway(backend, session_in(dir));
    let mut flow = LoginFlow::new(gw.clone());
    flow.refresh_captcha().await.unwrap();
    flow.submit("admin", "admin123", "7").await.unwrap();
    gw
}

// ---- Login and session lifecycle ----

#[tokio::test]
async fn login_then_browse_menus_as_tree() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let gw = logged_in(&backend, &dir).await;

    backend.serve_menus(&fixtures::sample_menus()).await;
    let menus = gw.menu_list().await.unwrap();
    let tree = build_tree(&menus);

    // System, Monitoring, Legacy at the root, ordered by sort key.
    let roots: Vec<&str> = tree.iter().map(|e| e.node.menu_name.as_str()).collect();
    assert_eq!(roots, vec!["System", "Monitoring", "Legacy"]);
    // Users and Roles under System, Role Query under Roles.
    assert_eq!(tree[0].children.len(), 2);
    assert_eq!(tree[0].children[1].children[0].node.menu_name, "Role Query");
}

#[tokio::test]
async fn persisted_session_survives_restart() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    logged_in(&backend, &dir).await;

    // A fresh store over the same path picks the token back up; the cached
    // profile does not survive and must be refetched.
    let resumed = session_in(&dir);
    assert_eq!(resumed.state(), SessionState::Authenticated);
    assert!(resumed.profile().is_none());

    let gw = gateway(&backend, resumed);
    let profile = gw.current_user().await.unwrap();
    assert_eq!(profile.username, "admin");
}

#[tokio::test]
async fn revoked_token_forces_logout_mid_browse() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let gw = logged_in(&backend, &dir).await;
    backend.revoke_token().await;

    let err = gw.menu_list().await.unwrap_err();
    assert!(err.invalidates_session());
    assert_eq!(gw.session().state(), SessionState::Anonymous);
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn rejected_login_keeps_session_anonymous_and_rotates_captcha() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    backend.serve_captcha("c-static").await;
    backend.serve_login_rejection("captcha mismatch").await;

    let gw = gateway(&backend, session_in(&dir));
    let mut flow = LoginFlow::new(gw.clone());
    flow.refresh_captcha().await.unwrap();

    let err = flow.submit("admin", "admin123", "wrong").await.unwrap_err();
    assert!(matches!(err, KontorError::Authentication { .. }));
    assert_eq!(gw.session().state(), SessionState::Anonymous);
    // A replacement challenge is already waiting.
    assert!(flow.challenge().is_some());
}

// ---- Grant pipeline ----

#[tokio::test]
async fn grant_commit_is_a_full_replace_of_the_role_set() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let gw = logged_in(&backend, &dir).await;

    backend.serve_menus(&fixtures::sample_menus()).await;
    backend.serve_roles(&fixtures::sample_roles()).await;
    backend.serve_grant_ok(2).await;

    let menus = gw.menu_list().await.unwrap();
    let roles = gw.role_list().await.unwrap();
    let operator = roles.iter().find(|r| r.role_id == RoleId(2)).unwrap();

    // Operator holds {2}; grant Users (100) and revoke Monitoring (2).
    let mut working = PermissionSet::load(operator, CascadePolicy::Explicit);
    working.toggle(NodeId(100), &menus);
    working.toggle(NodeId(2), &menus);
    gw.grant_menus(operator.role_id, &working.commit_payload())
        .await
        .unwrap();

    let grant_request = backend
        .server()
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.url.path() == "/roles/2/menus")
        .unwrap();
    let sent: MenuGrantRequest = serde_json::from_slice(&grant_request.body).unwrap();
    assert_eq!(sent.menu_ids, vec![NodeId(100)]);
}

#[tokio::test]
async fn delete_of_a_parent_surfaces_the_backend_conflict() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let gw = logged_in(&backend, &dir).await;
    backend
        .serve_delete_conflict(1, "menu still has children")
        .await;

    let err = gw.delete_menu(NodeId(1)).await.unwrap_err();
    assert!(
        matches!(err, KontorError::Conflict { ref message } if message == "menu still has children")
    );
    // Conflicts are local to the operation; the session is untouched.
    assert_eq!(gw.session().state(), SessionState::Authenticated);
}

// ---- View plumbing ----

#[tokio::test]
async fn table_view_matches_tree_order_with_depths() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let gw = logged_in(&backend, &dir).await;
    backend.serve_menus(&fixtures::sample_menus()).await;

    let menus = gw.menu_list().await.unwrap();
    let rows: Vec<(String, usize)> = flatten_for_table(&menus)
        .iter()
        .map(|r| (r.node.menu_name.clone(), r.depth))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("System".to_string(), 0),
            ("Users".to_string(), 1),
            ("Roles".to_string(), 1),
            ("Role Query".to_string(), 2),
            ("Monitoring".to_string(), 0),
            ("Legacy".to_string(), 0),
        ]
    );
}

#[tokio::test]
async fn stale_fetch_ticket_is_dropped() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let gw = logged_in(&backend, &dir).await;
    backend.serve_menus(&fixtures::sample_menus()).await;

    let sequence = FetchSequence::new();
    let first = sequence.begin();
    let _first_result = gw.menu_list().await.unwrap();

    // The operator refreshed before the first result was applied.
    let second = sequence.begin();
    let second_result = gw.menu_list().await.unwrap();

    assert!(!first.is_current());
    assert!(second.is_current());
    assert_eq!(second_result.len(), 6);
}

#[tokio::test]
async fn logout_notifies_server_and_clears_locally() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let gw = logged_in(&backend, &dir).await;
    backend.serve_logout_ok().await;

    gw.logout().await;
    assert_eq!(gw.session().state(), SessionState::Anonymous);

    let logout_hits = backend
        .server()
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/logout")
        .count();
    assert_eq!(logout_hits, 1);
}
