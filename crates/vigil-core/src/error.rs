// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vigil credential engine.

use thiserror::Error;

/// Boxed error source carried by collaborator failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type used across all Vigil crates.
#[derive(Debug, Error)]
pub enum VigilError {
    /// Configuration errors (invalid TOML, missing fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The user asked for an analysis of an empty credential.
    #[error("input is empty")]
    EmptyInput,

    /// The external risk evaluator failed (transport, service, or payload).
    #[error("evaluation failed: {message}")]
    Evaluation {
        message: String,
        source: Option<BoxError>,
    },

    /// The external strengthen call failed.
    #[error("strengthen failed: {message}")]
    Strengthen {
        message: String,
        source: Option<BoxError>,
    },

    /// The external suggestion call failed.
    #[error("suggestion fetch failed: {message}")]
    Suggest {
        message: String,
        source: Option<BoxError>,
    },

    /// A run finished after a newer run had started; its result was dropped.
    #[error("stale result discarded: run {sequence} superseded by run {latest}")]
    StaleResultDiscarded { sequence: u64, latest: u64 },

    /// Boosting is not offered in the current analysis state.
    #[error("boost unavailable: {0}")]
    BoostUnavailable(String),

    /// Another boost fetch is still outstanding.
    #[error("a boost request is already in flight")]
    BoostInFlight,

    /// A cursor range does not fit the buffer.
    #[error("invalid range {start}..{end} for buffer of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// Vault consistency errors (corrupted snapshot, unknown entry).
    #[error("vault error: {0}")]
    Vault(String),

    /// Persistence backend errors.
    #[error("storage error: {source}")]
    Storage { source: BoxError },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VigilError {
    /// Shorthand for an evaluation failure without an underlying source.
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a strengthen failure without an underlying source.
    pub fn strengthen(message: impl Into<String>) -> Self {
        Self::Strengthen {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a suggestion failure without an underlying source.
    pub fn suggest(message: impl Into<String>) -> Self {
        Self::Suggest {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true for failures reported by an external collaborator.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::Evaluation { .. } | Self::Strengthen { .. } | Self::Suggest { .. }
        )
    }
}
