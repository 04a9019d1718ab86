// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Kontor console client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Kontor configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KontorConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Token persistence and lifetime settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Console behavior settings.
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// Backend connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Base URL of the console backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fixed per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Token persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Path of the durable token record.
    #[serde(default = "default_token_path")]
    pub token_path: String,

    /// Token lifetime stamped into the record at login, in days.
    /// Mirrors the backend's fixed token expiry.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
            token_ttl_days: default_token_ttl_days(),
        }
    }
}

fn default_token_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("kontor").join("session.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("session.json"))
        .to_string_lossy()
        .into_owned()
}

fn default_token_ttl_days() -> i64 {
    7
}

/// Console behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Spaces of left padding per tree depth level in table views.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// When true, checking a menu in the grant picker also checks its
    /// descendants. Off by default: implicit grants surprise operators.
    #[serde(default)]
    pub cascade_checks: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            indent_width: default_indent_width(),
            cascade_checks: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_indent_width() -> usize {
    2
}
