// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated session state for the Kontor console client.
//!
//! One [`SessionStore`] value is created at process start and handed to the
//! gateway and the UI layer explicitly; there is no ambient global session.
//! The store owns two things: a durable token record (JSON on disk, so a
//! session survives process restarts until its fixed expiry) and an in-memory
//! cached profile. `authenticated` is always derived from the presence of a
//! currently-valid token, never stored on its own.

pub mod record;
pub mod store;

pub use record::TokenRecord;
pub use store::{SessionState, SessionStore};
