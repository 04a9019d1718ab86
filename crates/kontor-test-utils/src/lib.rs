// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Kontor integration tests.
//!
//! Provides a mock console backend and canned fixture data for fast,
//! deterministic, CI-runnable tests without a real server.
//!
//! # Components
//!
//! - [`MockBackend`] - wiremock-based console backend with mount helpers
//! - [`fixtures`] - canned menus, departments, roles, and profiles

pub mod backend;
pub mod fixtures;

pub use backend::MockBackend;
