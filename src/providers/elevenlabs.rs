//! ElevenLabs speech-synthesis client
//!
//! Calls `v1/text-to-speech/{voice_id}` and buffers the streamed audio body

use super::SpeechSynthesizer;
use crate::config::ElevenLabsConfig;
use crate::models::elevenlabs::{ElevenLabsErrorResponse, TextToSpeechRequest};
use crate::models::{AudioGenerationRequest, AudioGenerationResponse, AudioModel, OutputFormat, Voice};
use crate::utils::error::{ApiError, Vendor};
use crate::utils::logging::truncate_content;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio_stream::StreamExt;
use tracing::{debug, error};

/// ElevenLabs API client
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsClient {
    /// Create a new client instance; fails if no API key is configured
    pub fn new(config: ElevenLabsConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            anyhow::bail!("ElevenLabs API key is required");
        }

        let mut builder = Client::builder().user_agent(concat!("textvoice/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Build the request URL for a voice
    fn build_url(&self, voice: Voice) -> String {
        let base_url = self.config.base_url.trim_end_matches('/');
        format!("{}/v1/text-to-speech/{}", base_url, voice)
    }

    /// Voice, model and format after defaults are applied
    fn resolve(&self, request: &AudioGenerationRequest) -> (Voice, AudioModel, OutputFormat) {
        (
            request.voice_id.unwrap_or(self.config.default_voice),
            request.model_id.unwrap_or(self.config.default_model),
            request.output_format.unwrap_or(self.config.default_format),
        )
    }

    fn transport_error(context: &str, e: reqwest::Error) -> ApiError {
        let e = e.without_url();
        error!("{}: {}", context, e);
        ApiError::request_failed(Vendor::ElevenLabs, format!("{}: {}", context, e))
            .with_details(serde_json::json!({ "error": e.to_string() }))
    }

    /// Convert a non-2xx reply into a normalized error
    fn parse_failure(status: StatusCode, body: &str) -> ApiError {
        let details = serde_json::from_str::<serde_json::Value>(body)
            .unwrap_or_else(|_| serde_json::Value::String(body.to_string()));

        let message = serde_json::from_str::<ElevenLabsErrorResponse>(body)
            .ok()
            .and_then(|parsed| parsed.detail.message().map(|m| format!("ElevenLabs API error: {}", m)))
            .unwrap_or_else(|| format!("ElevenLabs API request failed with status {}", status));

        ApiError::upstream(Vendor::ElevenLabs, status.as_u16(), message).with_details(details)
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    async fn synthesize(&self, request: &AudioGenerationRequest) -> Result<AudioGenerationResponse, ApiError> {
        let (voice, model, format) = self.resolve(request);
        let voice_settings = request.voice_settings.unwrap_or_default();
        debug!(
            "Sending ElevenLabs text-to-speech request: voice={}, model={}, format={}, text_len={}",
            voice,
            model,
            format,
            request.text.len()
        );

        let body = TextToSpeechRequest {
            text: &request.text,
            model_id: model.as_str(),
            voice_settings: voice_settings.into(),
        };

        let response = self
            .client
            .post(self.build_url(voice))
            .query(&[("output_format", format.as_str())])
            .header("xi-api-key", &self.config.api_key)
            .header("Accept", format.mime_type())
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::transport_error("ElevenLabs request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("ElevenLabs API request failed: {} - {}", status, truncate_content(&error_text, 500));
            return Err(Self::parse_failure(status, &error_text));
        }

        let mut audio: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Self::transport_error("Failed to read ElevenLabs audio stream", e))?;
            audio.extend_from_slice(&chunk);
        }

        debug!("ElevenLabs request completed: {} audio bytes", audio.len());
        Ok(AudioGenerationResponse::from_bytes(&audio, format, voice))
    }
}
