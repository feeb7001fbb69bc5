//! Gemini text-generation client
//!
//! Calls `v1beta/models/{model}:generateContent` with the API key as a query
//! parameter

use super::TextGenerator;
use crate::config::GeminiConfig;
use crate::models::gemini::{GeminiErrorResponse, GeminiRequest, GeminiResponse};
use crate::models::{TextGenerationRequest, TextGenerationResponse, TextModel, TokenUsage};
use crate::utils::error::{ApiError, ErrorCode, Vendor};
use crate::utils::logging::truncate_content;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client instance; fails if no API key is configured
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            anyhow::bail!("Gemini API key is required");
        }

        let mut builder = Client::builder().user_agent(concat!("textvoice/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Build the request URL (without the key)
    fn build_url(&self, model: TextModel) -> String {
        let base_url = self.config.base_url.trim_end_matches('/');
        format!("{}/v1beta/models/{}:generateContent", base_url, model)
    }

    /// Convert a successful reply into the normalized response
    ///
    /// A missing or empty first text part counts as no content.
    fn parse_success(body: &str, model: TextModel) -> Result<TextGenerationResponse, ApiError> {
        let raw: serde_json::Value = serde_json::from_str(body).map_err(|e| {
            ApiError::request_failed(Vendor::Gemini, format!("Failed to parse Gemini response: {}", e))
                .with_details(serde_json::Value::String(truncate_content(body, 500)))
        })?;

        let response: GeminiResponse = serde_json::from_value(raw.clone()).map_err(|e| {
            ApiError::request_failed(Vendor::Gemini, format!("Unexpected Gemini response shape: {}", e))
                .with_details(raw.clone())
        })?;

        let text = match response.first_text().filter(|text| !text.is_empty()) {
            Some(text) => text.to_string(),
            None => {
                warn!("Gemini response contained no text (finish reason: {:?})", response.finish_reason());
                return Err(ApiError::new(
                    ErrorCode::GeminiNoContent,
                    "Gemini returned no text content",
                    StatusCode::BAD_GATEWAY.as_u16(),
                )
                .with_details(raw));
            }
        };

        let usage = response.usage_metadata.as_ref().map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        let mut metadata = serde_json::Map::new();
        if let Some(reason) = response.finish_reason() {
            metadata.insert("finishReason".to_string(), reason.into());
        }
        if let Some(version) = &response.model_version {
            metadata.insert("modelVersion".to_string(), version.clone().into());
        }

        Ok(TextGenerationResponse {
            text,
            model,
            usage,
            metadata: if metadata.is_empty() { None } else { Some(metadata.into()) },
        })
    }

    /// Convert a non-2xx reply into a normalized error
    fn parse_failure(status: StatusCode, body: &str) -> ApiError {
        let details = serde_json::from_str::<serde_json::Value>(body)
            .unwrap_or_else(|_| serde_json::Value::String(body.to_string()));

        let message = match serde_json::from_str::<GeminiErrorResponse>(body) {
            Ok(parsed) => format!("Gemini API error: {}", parsed.error.message),
            Err(_) => format!("Gemini API request failed with status {}", status),
        };

        ApiError::upstream(Vendor::Gemini, status.as_u16(), message).with_details(details)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_text(&self, request: &TextGenerationRequest) -> Result<TextGenerationResponse, ApiError> {
        let model = request.model.unwrap_or(self.config.default_model);
        debug!("Sending Gemini generateContent request: model={}, prompt={}", model, truncate_content(&request.prompt, 100));

        let response = self
            .client
            .post(self.build_url(model))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&GeminiRequest::from_prompt(&request.prompt))
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Gemini request failed: {}", e);
                ApiError::request_failed(Vendor::Gemini, format!("Gemini request failed: {}", e))
                    .with_details(serde_json::json!({ "error": e.to_string() }))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            ApiError::request_failed(Vendor::Gemini, format!("Failed to read Gemini response body: {}", e))
                .with_details(serde_json::json!({ "error": e.to_string() }))
        })?;

        if status.is_success() {
            let result = Self::parse_success(&body, model)?;
            debug!("Gemini request completed: {} chars generated", result.text.len());
            Ok(result)
        } else {
            error!("Gemini API request failed: {} - {}", status, truncate_content(&body, 500));
            Err(Self::parse_failure(status, &body))
        }
    }
}
