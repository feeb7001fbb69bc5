//! Audio generation service

use crate::models::{AudioGenerationRequest, AudioGenerationResponse};
use crate::providers::SpeechSynthesizer;
use crate::utils::error::{AppError, AppResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Thin wrapper over a [`SpeechSynthesizer`]
#[derive(Clone)]
pub struct AudioGenerationService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl AudioGenerationService {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }

    /// Synthesize speech; empty text and out-of-range voice settings are
    /// rejected before any remote call
    pub async fn generate(&self, request: &AudioGenerationRequest) -> AppResult<AudioGenerationResponse> {
        if request.text.is_empty() {
            return Err(AppError::Validation("Text is required".to_string()));
        }
        if let Some(settings) = &request.voice_settings {
            settings.validate().map_err(AppError::Validation)?;
        }

        debug!("Generating audio with provider: {}", self.synthesizer.name());
        let response = self.synthesizer.synthesize(request).await?;
        info!(
            "Audio generated: voice={}, format={}, bytes={}",
            response.voice_id, response.format, response.size_bytes
        );

        Ok(response)
    }
}

impl std::fmt::Debug for AudioGenerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioGenerationService")
            .field("provider", &self.synthesizer.name())
            .finish()
    }
}
