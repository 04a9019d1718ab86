// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as well-formed URLs, positive timeouts, and known log
//! levels.

use crate::diagnostic::ConfigError;
use crate::model::KontorConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &KontorConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.server.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("server.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.server.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "server.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.session.token_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.token_path must not be empty".to_string(),
        });
    }

    if config.session.token_ttl_days < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "session.token_ttl_days must be at least 1, got {}",
                config.session.token_ttl_days
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.console.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "console.log_level `{}` is not one of {}",
                config.console.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.console.indent_width == 0 {
        errors.push(ConfigError::Validation {
            message: "console.indent_width must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = KontorConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_base_url_fails_validation() {
        let mut config = KontorConfig::default();
        config.server.base_url = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = KontorConfig::default();
        config.server.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("http"))));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = KontorConfig::default();
        config.server.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn zero_ttl_fails_validation() {
        let mut config = KontorConfig::default();
        config.session.token_ttl_days = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("token_ttl_days"))));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = KontorConfig::default();
        config.console.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = KontorConfig::default();
        config.server.base_url = "https://console.example.com".to_string();
        config.server.timeout_secs = 30;
        config.session.token_ttl_days = 1;
        config.console.log_level = "debug".to_string();
        config.console.cascade_checks = true;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn cascade_checks_defaults_off() {
        let toml_str = r#"
[console]
log_level = "warn"
"#;
        let config: KontorConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.console.cascade_checks);
        assert_eq!(config.console.log_level, "warn");
    }

    #[test]
    fn sections_deny_unknown_fields() {
        let toml_str = r#"
[server]
base_url = "http://localhost:8080"
timout_secs = 5
"#;
        assert!(toml::from_str::<KontorConfig>(toml_str).is_err());
    }
}
