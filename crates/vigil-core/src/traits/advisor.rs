// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Advisor adapter trait for the external AI inference collaborator.

use async_trait::async_trait;

use crate::error::VigilError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{AnalysisResult, StrengthenResult, SuggestionSet};

/// The three opaque async operations the engine delegates to an external model.
///
/// Implementations own transport, prompting and timeouts. Each operation
/// fails with its own [`VigilError`] variant (`Evaluation`, `Strengthen`,
/// `Suggest`) on any transport or service problem.
#[async_trait]
pub trait AdvisorAdapter: PluginAdapter {
    /// Scores a credential and lists the attack vectors effective against it.
    async fn evaluate_risk(&self, text: &str) -> Result<AnalysisResult, VigilError>;

    /// Produces a stronger, still memorable variant of the credential.
    async fn strengthen(&self, text: &str) -> Result<StrengthenResult, VigilError>;

    /// Proposes symbols, suffixes and substitutions for manual editing.
    async fn suggest(&self, text: &str) -> Result<SuggestionSet, VigilError>;
}
