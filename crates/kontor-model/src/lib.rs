// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire data model for the Kontor console backend.
//!
//! The backend serves camelCase JSON and encodes enums as the single-character
//! and digit codes defined by its schema (`"M"`/`"C"`/`"F"` for menu kinds,
//! `"1"`..`"5"` for data scopes, `"0"`/`"1"` for status flags). The structs
//! here deserialize those codes into typed Rust values once, at the boundary.

pub mod auth;
pub mod node;
pub mod role;

pub use auth::{CaptchaChallenge, LoginRequest, LoginResponse, UserProfile};
pub use node::{Department, Menu, MenuKind, TreeNode};
pub use role::{DataScope, MenuGrantRequest, Role};

use serde::Deserialize;

/// Error payload the backend attaches to non-2xx responses.
///
/// Only the human-readable message is guaranteed; the gateway falls back to
/// the raw body when this does not parse.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
