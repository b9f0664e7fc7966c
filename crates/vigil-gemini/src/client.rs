// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Handles authentication, JSON-constrained generation and a single retry
//! on transient statuses (429, 500, 503).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Failures talking to the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gemini returned no content")]
    EmptyResponse,

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid client configuration: {0}")]
    Setup(String),
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    max_retries: u32,
}

impl GeminiClient {
    pub fn new(
        api_key: &SecretString,
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, GeminiError> {
        let mut key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| GeminiError::Setup(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{model}:generateContent",
                base_url.trim_end_matches('/')
            ),
            model: model.to_string(),
            max_retries: 1,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a request and return the text of the first candidate.
    ///
    /// Transient statuses are retried once after a one-second pause.
    pub async fn generate(&self, request: &GenerateContentRequest) -> Result<String, GeminiError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying generateContent after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self.client.post(&self.endpoint).json(request).send().await?;
            let status = response.status();
            debug!(status = %status, attempt, model = %self.model, "generateContent response");

            if status.is_success() {
                let body = response.text().await?;
                let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
                return parsed
                    .first_text()
                    .map(str::to_string)
                    .ok_or(GeminiError::EmptyResponse);
            }

            let body = response.text().await.unwrap_or_default();
            let error = api_error(status, &body);

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, "transient error, will retry");
                last_error = Some(error);
                continue;
            }
            return Err(error);
        }

        Err(last_error.unwrap_or(GeminiError::EmptyResponse))
    }
}

fn api_error(status: reqwest::StatusCode, body: &str) -> GeminiError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) if !parsed.error.status.is_empty() => {
            format!("{}: {}", parsed.error.status, parsed.error.message)
        }
        Ok(parsed) => parsed.error.message,
        Err(_) => body.to_string(),
    };
    GeminiError::Api {
        status: status.as_u16(),
        message,
    }
}

fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
