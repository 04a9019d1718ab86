// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Kontor console client.

use thiserror::Error;

/// The primary error type used across all Kontor crates.
///
/// The variants mirror the failure classes an operator can hit: local input
/// problems, the two distinct credential failures (rejected login vs. rejected
/// token), missing or conflicting resources, transport faults, and backend
/// errors. Only [`KontorError::Authorization`] forces the session to be
/// cleared; every other kind is local to the operation that raised it.
#[derive(Debug, Error)]
pub enum KontorError {
    /// Malformed input caught before anything is sent to the backend.
    #[error("validation error: {0}")]
    Validation(String),

    /// Credentials or captcha rejected; the session stays anonymous and the
    /// captcha challenge must be rotated before retrying.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The presented token was rejected (expired, revoked, or malformed).
    /// The gateway clears the session when it sees this.
    #[error("authorization failed: {message}")]
    Authorization { message: String },

    /// A referenced resource vanished server-side; callers should refetch.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The backend refused the operation in its current state, e.g. deleting
    /// a node that still has descendants without confirmation.
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Timeout or network failure; retryable by user action, session
    /// untouched.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a 5xx status; surfaced generically.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Failure reading or writing the durable token record.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors, including invalid state transitions.
    #[error("internal error: {0}")]
    Internal(String),
}

impl KontorError {
    /// Whether this error forces the session to be invalidated.
    ///
    /// Authorization failures are the only global failure: the gateway clears
    /// the persisted token and cached profile no matter which screen issued
    /// the request.
    #[must_use]
    pub fn invalidates_session(&self) -> bool {
        matches!(self, Self::Authorization { .. })
    }

    /// Whether the failed operation is worth retrying by the user without
    /// changing anything else first.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Server { .. })
    }
}
