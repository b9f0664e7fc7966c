// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-based layered loading.
//!
//! Lookup order: `./vigil.toml` > `~/.config/vigil/vigil.toml` > `/etc/vigil/vigil.toml`,
//! with `VIGIL_*` environment variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::VigilConfig;

/// Config sections that environment variables may address.
pub(crate) const SECTIONS: [&str; 5] = ["engine", "pipeline", "boost", "vault", "gemini"];

/// Load configuration from the XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/vigil/vigil.toml`
/// 3. `~/.config/vigil/vigil.toml`
/// 4. `./vigil.toml`
/// 5. `VIGIL_*` environment variables
pub fn load_config() -> Result<VigilConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<VigilConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VigilConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VigilConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VigilConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(VigilConfig::default()))
        .merge(Toml::file("/etc/vigil/vigil.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("vigil/vigil.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("vigil.toml"))
        .merge(env_provider())
}

/// Environment provider mapping only the section prefix to a dot.
///
/// `VIGIL_GEMINI_API_KEY` must become `gemini.api_key`, not `gemini.api.key`,
/// so `Env::split("_")` cannot be used.
fn env_provider() -> Env {
    Env::prefixed("VIGIL_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a prefix-stripped env key onto a dotted config path.
pub fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}

/// Environment variable that overrides a dotted config path.
pub fn env_var_for(path: &str) -> String {
    format!("VIGIL_{}", path.replace('.', "_").to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_var_names_follow_sections() {
        assert_eq!(env_var_for("pipeline.trace_capacity"), "VIGIL_PIPELINE_TRACE_CAPACITY");
        assert_eq!(map_env_key("gemini_api_key"), "gemini.api_key");
        assert_eq!(env_var_for("gemini.api_key"), "VIGIL_GEMINI_API_KEY");
    }

    #[test]
    fn env_keys_map_section_only() {
        assert_eq!(map_env_key("gemini_api_key"), "gemini.api_key");
        assert_eq!(map_env_key("pipeline_trace_capacity"), "pipeline.trace_capacity");
        assert_eq!(map_env_key("vault_default_expiry_days"), "vault.default_expiry_days");
        assert_eq!(map_env_key("engine_log_level"), "engine.log_level");
        assert_eq!(map_env_key("BOOST_AUTO_WARMUP_MS"), "boost.auto_warmup_ms");
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(map_env_key("telemetry_level"), "telemetry_level");
    }
}
