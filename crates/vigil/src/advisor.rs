// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Advisor construction from configuration.

use std::sync::Arc;

use tracing::info;
use vigil_config::VigilConfig;
use vigil_core::{AdvisorAdapter, VigilError};
use vigil_gemini::{FallbackAdvisor, GeminiAdvisor, API_KEY_ENV};

/// Build the Gemini advisor, wrapped with the offline fallback when enabled.
pub fn build_advisor(config: &VigilConfig) -> Result<Arc<dyn AdvisorAdapter>, VigilError> {
    let gemini = GeminiAdvisor::new(&config.gemini).inspect_err(|_| {
        eprintln!(
            "error: Gemini API key required. Set via: config `gemini.api_key`, VIGIL_GEMINI_API_KEY, or {API_KEY_ENV}"
        );
    })?;
    let advisor: Arc<dyn AdvisorAdapter> = Arc::new(gemini);

    if config.gemini.offline_fallback {
        info!("offline fallback enabled");
        return Ok(Arc::new(FallbackAdvisor::new(advisor)));
    }
    Ok(advisor)
}
