// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the pipeline, the mutation engine, and the vault.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the role an adapter plays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    /// External risk evaluation / strengthen / suggestion collaborator.
    Advisor,
    /// Persistence port for the credential vault.
    VaultStore,
}

// --- Advisor payloads ---

/// Structured payload returned by the external risk evaluator.
///
/// Only `score` and `attack_vectors` are interpreted by the engine. The
/// narrative fields are carried for display and anything the evaluator adds
/// beyond the known fields is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Security score from 0 to 100.
    pub score: f64,
    /// Attack methods effective against the credential, in evaluator order.
    pub attack_vectors: Vec<String>,
    #[serde(default)]
    pub crack_time: String,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub ai_insight: String,
    /// "Low", "Medium", "High" or "Critical".
    #[serde(default)]
    pub breach_probability: String,
    #[serde(default)]
    pub similar_patterns: Vec<String>,
    /// Free-form extension bag for fields the engine does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AnalysisResult {
    /// Minimal result with a score and attack vectors; narrative fields empty.
    pub fn new(score: f64, attack_vectors: Vec<String>) -> Self {
        Self {
            score,
            attack_vectors,
            crack_time: String::new(),
            weaknesses: Vec::new(),
            strengths: Vec::new(),
            ai_insight: String::new(),
            breach_probability: String::new(),
            similar_patterns: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Output of the external "strengthen" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthenResult {
    #[serde(rename = "boostedPassword", alias = "strengthenedText")]
    pub strengthened_text: String,
    #[serde(default)]
    pub explanation: String,
}

/// A literal, case-insensitive substitution offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    #[serde(rename = "original", alias = "from")]
    pub from: String,
    #[serde(rename = "replacement", alias = "to")]
    pub to: String,
}

impl Substitution {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Building blocks offered to a manual mutation session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSet {
    #[serde(rename = "suggestedSymbols", default)]
    pub symbols: Vec<String>,
    #[serde(rename = "suggestedSuffixes", default)]
    pub suffixes: Vec<String>,
    #[serde(rename = "leetspeak", default)]
    pub substitutions: Vec<Substitution>,
}

// --- Vault types ---

/// The input modality a credential was captured with.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CaptureKind {
    /// Typed text.
    #[default]
    Text,
    /// Audio frequency fingerprint.
    Voice,
    /// Camera pixel fingerprint.
    Retina,
    /// Simulated biometric token.
    Bio,
}

impl CaptureKind {
    /// All capture kinds in display order.
    pub const ALL: [CaptureKind; 4] = [
        CaptureKind::Text,
        CaptureKind::Voice,
        CaptureKind::Retina,
        CaptureKind::Bio,
    ];
}

/// Unique identifier for a vault entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first four characters, used in user-facing messages.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(4)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A saved credential record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub id: EntryId,
    pub secret_value: String,
    pub created_at: DateTime<Utc>,
    /// Set only by an explicit reveal/copy.
    #[serde(default)]
    pub last_accessed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    pub capture_kind: CaptureKind,
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
}

/// Both vault collections, newest first, as handed to a persistence port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultSnapshot {
    pub active: Vec<CredentialEntry>,
    pub trashed: Vec<CredentialEntry>,
}

impl VaultSnapshot {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.trashed.is_empty()
    }
}
