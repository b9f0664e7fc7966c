// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini advisor adapter.
//!
//! [`GeminiAdvisor`] implements [`AdvisorAdapter`] over the Gemini
//! `generateContent` API, asking for JSON constrained by a response schema
//! for each of the three operations. [`FallbackAdvisor`] optionally wraps
//! any advisor with canned offline answers.

pub mod client;
pub mod fallback;
pub mod prompts;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use vigil_config::model::GeminiConfig;
use vigil_core::{
    AdapterType, AdvisorAdapter, AnalysisResult, HealthStatus, PluginAdapter, StrengthenResult,
    SuggestionSet, VigilError,
};

pub use crate::client::{GeminiClient, GeminiError};
pub use crate::fallback::FallbackAdvisor;
use crate::types::GenerateContentRequest;

/// Environment variable consulted when the config has no key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub struct GeminiAdvisor {
    client: GeminiClient,
}

impl GeminiAdvisor {
    /// Build an advisor from configuration.
    ///
    /// The key comes from `gemini.api_key`, then `GEMINI_API_KEY`.
    pub fn new(config: &GeminiConfig) -> Result<Self, VigilError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = GeminiClient::new(
            &api_key,
            &config.base_url,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        )
        .map_err(|e| VigilError::Config(e.to_string()))?;

        info!(model = %config.model, "Gemini advisor initialized");
        Ok(Self { client })
    }

    pub fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }

    async fn ask<T: DeserializeOwned>(
        &self,
        prompt: String,
        schema: serde_json::Value,
    ) -> Result<T, GeminiError> {
        let request = GenerateContentRequest::json_prompt(prompt, schema);
        let text = self.client.generate(&request).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl PluginAdapter for GeminiAdvisor {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Advisor
    }

    async fn health_check(&self) -> Result<HealthStatus, VigilError> {
        // No probe call; every request is billed.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VigilError> {
        debug!("Gemini advisor shutting down");
        Ok(())
    }
}

#[async_trait]
impl AdvisorAdapter for GeminiAdvisor {
    async fn evaluate_risk(&self, text: &str) -> Result<AnalysisResult, VigilError> {
        self.ask(prompts::evaluate_prompt(text), prompts::evaluate_schema())
            .await
            .map_err(|e| VigilError::Evaluation {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })
    }

    async fn strengthen(&self, text: &str) -> Result<StrengthenResult, VigilError> {
        self.ask(prompts::strengthen_prompt(text), prompts::strengthen_schema())
            .await
            .map_err(|e| VigilError::Strengthen {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })
    }

    async fn suggest(&self, text: &str) -> Result<SuggestionSet, VigilError> {
        self.ask(prompts::suggest_prompt(text), prompts::suggest_schema())
            .await
            .map_err(|e| VigilError::Suggest {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })
    }
}

fn resolve_api_key(config_key: &Option<String>) -> Result<SecretString, VigilError> {
    if let Some(key) = config_key
        && !key.trim().is_empty()
    {
        return Ok(SecretString::from(key.clone()));
    }

    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
        .ok_or_else(|| {
            VigilError::Config(format!(
                "Gemini API key not found. Set gemini.api_key in config or the {API_KEY_ENV} environment variable."
            ))
        })
}
