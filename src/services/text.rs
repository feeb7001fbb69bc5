//! Text generation service

use crate::models::{TextGenerationRequest, TextGenerationResponse};
use crate::providers::TextGenerator;
use crate::utils::error::{AppError, AppResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Thin wrapper over a [`TextGenerator`]
#[derive(Clone)]
pub struct TextGenerationService {
    generator: Arc<dyn TextGenerator>,
}

impl TextGenerationService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate text; an empty prompt is rejected before any remote call
    pub async fn generate(&self, request: &TextGenerationRequest) -> AppResult<TextGenerationResponse> {
        if request.prompt.is_empty() {
            return Err(AppError::Validation("Prompt is required".to_string()));
        }

        debug!("Generating text with provider: {}", self.generator.name());
        let response = self.generator.generate_text(request).await?;
        info!("Text generated: model={}, chars={}", response.model, response.text.len());

        Ok(response)
    }
}

impl std::fmt::Debug for TextGenerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextGenerationService")
            .field("provider", &self.generator.name())
            .finish()
    }
}
