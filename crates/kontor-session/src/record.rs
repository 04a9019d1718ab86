// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The durable token record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bearer token plus its client-side expiry, as persisted to disk.
///
/// The expiry mirrors the backend's fixed token lifetime; it exists so a
/// stale record is discarded locally instead of being presented and bounced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Whether the record is still presentable at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
