// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./kontor.toml` > `~/.config/kontor/kontor.toml`
//! > `/etc/kontor/kontor.toml`, with environment variable overrides via the
//! `KONTOR_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::KontorConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/kontor/kontor.toml` (system-wide)
/// 3. `~/.config/kontor/kontor.toml` (user XDG config)
/// 4. `./kontor.toml` (local directory)
/// 5. `KONTOR_*` environment variables
pub fn load_config() -> Result<KontorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KontorConfig::default()))
        .merge(Toml::file("/etc/kontor/kontor.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("kontor/kontor.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("kontor.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<KontorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KontorConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KontorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KontorConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `KONTOR_SERVER_BASE_URL` must map to
/// `server.base_url`, not `server.base.url`.
fn env_provider() -> Env {
    Env::prefixed("KONTOR_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped,
        // e.g. KONTOR_SESSION_TOKEN_PATH -> "session_token_path".
        let mapped = key
            .as_str()
            .replacen("server_", "server.", 1)
            .replacen("session_", "session.", 1)
            .replacen("console_", "console.", 1);
        mapped.into()
    })
}
