//! Provider module
//!
//! Defines the upstream client traits and the Gemini and ElevenLabs clients

pub mod elevenlabs;
pub mod gemini;

use crate::models::{
    AudioGenerationRequest, AudioGenerationResponse, TextGenerationRequest, TextGenerationResponse,
};
use crate::utils::error::ApiError;
use async_trait::async_trait;

/// Remote text-generation API
///
/// Every failure is returned already normalized.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Generate text for a single-turn prompt
    async fn generate_text(&self, request: &TextGenerationRequest) -> Result<TextGenerationResponse, ApiError>;
}

/// Remote speech-synthesis API
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Synthesize `request.text` and return the buffered, encoded audio
    async fn synthesize(&self, request: &AudioGenerationRequest) -> Result<AudioGenerationResponse, ApiError>;
}

pub use elevenlabs::ElevenLabsClient;
pub use gemini::GeminiClient;
