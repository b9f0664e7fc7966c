// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Every struct uses `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Vigil configuration.
///
/// All sections are optional and fall back to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VigilConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Analysis pipeline and trace playback.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Auto/manual strengthening.
    #[serde(default)]
    pub boost: BoostConfig,

    /// Credential vault lifecycle and persistence.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Gemini advisor connection.
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Analysis pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Maximum retained trace lines; the oldest are dropped first.
    #[serde(default = "default_trace_capacity")]
    pub trace_capacity: usize,

    /// Sleep between scripted trace steps. Disable for scripted use.
    #[serde(default = "default_simulate_delays")]
    pub simulate_delays: bool,

    /// Scores strictly below this make a completed run boost-eligible.
    #[serde(default = "default_boost_threshold")]
    pub boost_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            trace_capacity: default_trace_capacity(),
            simulate_delays: default_simulate_delays(),
            boost_threshold: default_boost_threshold(),
        }
    }
}

fn default_trace_capacity() -> usize {
    50
}

fn default_simulate_delays() -> bool {
    true
}

fn default_boost_threshold() -> f64 {
    95.0
}

/// Boost configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BoostConfig {
    /// Pause between the auto-boost announcement and the strengthen call.
    #[serde(default = "default_auto_warmup_ms")]
    pub auto_warmup_ms: u64,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            auto_warmup_ms: default_auto_warmup_ms(),
        }
    }
}

fn default_auto_warmup_ms() -> u64 {
    2500
}

/// Credential vault configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Days from capture until a new entry expires.
    #[serde(default = "default_expiry_days")]
    pub default_expiry_days: i64,

    /// Entries expiring within this many days are flagged as expiring soon.
    #[serde(default = "default_warning_days")]
    pub expiry_warning_days: i64,

    /// Path to the SQLite database holding the vault.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            default_expiry_days: default_expiry_days(),
            expiry_warning_days: default_warning_days(),
            database_path: default_database_path(),
        }
    }
}

fn default_expiry_days() -> i64 {
    90
}

fn default_warning_days() -> i64 {
    7
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("vigil").join("vault.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("vault.db"))
        .to_string_lossy()
        .into_owned()
}

/// Gemini advisor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. Falls back to the `GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for every advisor call.
    #[serde(default = "default_model")]
    pub model: String,

    /// API root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Answer with canned offline payloads when the API fails.
    #[serde(default)]
    pub offline_fallback: bool,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            offline_fallback: false,
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}
