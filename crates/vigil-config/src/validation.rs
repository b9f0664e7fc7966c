// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::VigilConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every violation instead of failing on the first one.
pub fn validate_config(config: &VigilConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.engine.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(
            "engine.log_level",
            format!(
                "`{}` must be one of: {}",
                config.engine.log_level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if config.pipeline.trace_capacity == 0 {
        errors.push(ConfigError::validation(
            "pipeline.trace_capacity",
            "must be at least 1",
        ));
    }

    let threshold = config.pipeline.boost_threshold;
    if !(threshold > 0.0 && threshold <= 100.0) {
        errors.push(ConfigError::validation(
            "pipeline.boost_threshold",
            format!("must be in (0, 100], got {threshold}"),
        ));
    }

    if config.vault.default_expiry_days < 1 {
        errors.push(ConfigError::validation(
            "vault.default_expiry_days",
            format!("must be at least 1, got {}", config.vault.default_expiry_days),
        ));
    }

    if config.vault.expiry_warning_days < 0 {
        errors.push(ConfigError::validation(
            "vault.expiry_warning_days",
            format!("must be non-negative, got {}", config.vault.expiry_warning_days),
        ));
    }

    if config.vault.database_path.trim().is_empty() {
        errors.push(ConfigError::validation("vault.database_path", "must not be empty"));
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::validation("gemini.model", "must not be empty"));
    }

    let base_url = config.gemini.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::validation(
            "gemini.base_url",
            format!("`{base_url}` must be an http(s) URL"),
        ));
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::validation("gemini.timeout_secs", "must be at least 1"));
    }

    if let Some(key) = &config.gemini.api_key
        && key.trim().is_empty()
    {
        errors.push(ConfigError::validation(
            "gemini.api_key",
            "is set but empty; remove it or provide a key",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
