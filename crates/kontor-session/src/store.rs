// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session store and its state machine.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use kontor_core::KontorError;
use kontor_model::UserProfile;
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::record::TokenRecord;

/// Authentication lifecycle states.
///
/// `Anonymous → Authenticating → Authenticated → Anonymous`, with
/// profile refresh looping on `Authenticated`. Forced invalidation (a
/// rejected token on any request) and logout both land back on `Anonymous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated,
}

struct Inner {
    path: PathBuf,
    ttl: Duration,
    record: Option<TokenRecord>,
    profile: Option<UserProfile>,
    authenticating: bool,
}

/// Cloneable handle to the single session owned by this process.
///
/// Cloning shares state: the gateway's forced invalidation is visible to the
/// UI layer holding another handle. All mutation is serially triggered by
/// user actions or completed responses, so a plain mutex suffices.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl SessionStore {
    /// Open the store, loading any persisted token record from `path`.
    ///
    /// An expired or unreadable record is discarded (with a log line), not an
    /// error: the operator simply has to log in again.
    pub fn open(path: impl Into<PathBuf>, token_ttl: Duration) -> Self {
        let path = path.into();
        let record = match load_record(&path) {
            Ok(Some(record)) if record.is_valid_at(Utc::now()) => {
                debug!(expires_at = %record.expires_at, "resumed persisted session");
                Some(record)
            }
            Ok(Some(record)) => {
                debug!(expires_at = %record.expires_at, "discarding expired token record");
                let _ = std::fs::remove_file(&path);
                None
            }
            Ok(None) => None,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable token record, discarding");
                let _ = std::fs::remove_file(&path);
                None
            }
        };
        Self {
            inner: Arc::new(Mutex::new(Inner {
                path,
                ttl: token_ttl,
                record,
                profile: None,
                authenticating: false,
            })),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        let inner = self.lock();
        if inner.authenticating {
            SessionState::Authenticating
        } else if valid_record(&inner).is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// Derived strictly from the presence of a currently-valid token.
    pub fn authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// The bearer token, if one is present and unexpired.
    pub fn token(&self) -> Option<SecretString> {
        let inner = self.lock();
        valid_record(&inner).map(|r| SecretString::from(r.token.clone()))
    }

    /// `Anonymous → Authenticating`; rejected in any other state.
    pub fn begin_login(&self) -> Result<(), KontorError> {
        let mut inner = self.lock();
        if inner.authenticating {
            return Err(KontorError::Internal(
                "login already in progress".to_string(),
            ));
        }
        if valid_record(&inner).is_some() {
            return Err(KontorError::Internal(
                "already authenticated; log out first".to_string(),
            ));
        }
        inner.authenticating = true;
        Ok(())
    }

    /// `Authenticating → Authenticated`: persist the token with the fixed
    /// TTL stamped in.
    pub fn establish(&self, token: &str) -> Result<(), KontorError> {
        let mut inner = self.lock();
        if !inner.authenticating {
            return Err(KontorError::Internal(
                "establish called outside a login attempt".to_string(),
            ));
        }
        let record = TokenRecord {
            token: token.to_string(),
            expires_at: Utc::now() + inner.ttl,
        };
        persist_record(&inner.path, &record)?;
        inner.record = Some(record);
        inner.authenticating = false;
        Ok(())
    }

    /// `Authenticating → Anonymous` after a rejected credential or captcha.
    pub fn login_failed(&self) {
        let mut inner = self.lock();
        inner.authenticating = false;
        inner.profile = None;
    }

    /// Clear everything, unconditionally: persisted record, cached profile,
    /// any in-flight login. Used for both logout and forced invalidation.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.record = None;
        inner.profile = None;
        inner.authenticating = false;
        if let Err(err) = std::fs::remove_file(&inner.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %inner.path.display(), error = %err, "failed to remove token record");
            }
        }
    }

    /// Cache the freshly fetched profile.
    pub fn cache_profile(&self, profile: UserProfile) {
        self.lock().profile = Some(profile);
    }

    /// The cached profile, if any. Memory only; refetched after restart.
    pub fn profile(&self) -> Option<UserProfile> {
        self.lock().profile.clone()
    }

    /// Expiry of the current token record, if one is held.
    pub fn expires_at(&self) -> Option<chrono::DateTime<Utc>> {
        let inner = self.lock();
        valid_record(&inner).map(|r| r.expires_at)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned mutex means a panic mid-update; the session data is
        // plain values, safe to keep using.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn valid_record(inner: &Inner) -> Option<&TokenRecord> {
    inner
        .record
        .as_ref()
        .filter(|r| r.is_valid_at(Utc::now()))
}

fn load_record(path: &Path) -> Result<Option<TokenRecord>, KontorError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            let record = serde_json::from_str(&raw).map_err(|e| KontorError::Storage {
                source: Box::new(e),
            })?;
            Ok(Some(record))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(KontorError::Storage {
            source: Box::new(err),
        }),
    }
}

fn persist_record(path: &Path, record: &TokenRecord) -> Result<(), KontorError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| KontorError::Storage {
            source: Box::new(e),
        })?;
    }
    let raw = serde_json::to_string_pretty(record).map_err(|e| KontorError::Storage {
        source: Box::new(e),
    })?;
    std::fs::write(path, raw).map_err(|e| KontorError::Storage {
        source: Box::new(e),
    })?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms).map_err(|e| KontorError::Storage {
            source: Box::new(e),
        })?;
    }
    Ok(())
}
