//! Generation request and response models
//!
//! The service's own JSON shapes (camelCase), independent of either vendor

use super::catalog::{AudioModel, OutputFormat, TextModel, Voice};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Text generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<TextModel>,
}

/// Token usage reported by the text API
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,
}

/// Text generation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationResponse {
    /// Generated text
    pub text: String,
    /// Model used
    pub model: TextModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Raw metadata echoed from the vendor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Voice tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

impl VoiceSettings {
    /// Apply partial overrides; every ratio must lie in `0.0..=1.0`
    pub fn merge(self, overrides: &VoiceSettingsOverride) -> Result<Self, String> {
        let merged = Self {
            stability: overrides.stability.unwrap_or(self.stability),
            similarity_boost: overrides.similarity_boost.unwrap_or(self.similarity_boost),
            style: overrides.style.unwrap_or(self.style),
            use_speaker_boost: overrides.use_speaker_boost.unwrap_or(self.use_speaker_boost),
        };
        merged.validate()?;
        Ok(merged)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("stability", self.stability),
            ("similarityBoost", self.similarity_boost),
            ("style", self.style),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be between 0.0 and 1.0", name));
            }
        }
        Ok(())
    }
}

/// Partial voice settings supplied by a caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSettingsOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_boost: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_speaker_boost: Option<bool>,
}

/// Audio generation request
///
/// Absent fields fall back to the audio client's configured defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioGenerationRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<AudioModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<VoiceSettings>,
}

impl AudioGenerationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: None,
            model_id: None,
            output_format: None,
            voice_settings: None,
        }
    }

    pub fn with_voice(mut self, voice: Option<Voice>) -> Self {
        self.voice_id = voice;
        self
    }
}

/// Audio overrides layered on top of a request (`audioSettings`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<AudioModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<VoiceSettingsOverride>,
}

impl AudioSettings {
    /// Merge these overrides onto `request`
    pub fn apply(&self, mut request: AudioGenerationRequest) -> Result<AudioGenerationRequest, String> {
        if let Some(model_id) = self.model_id {
            request.model_id = Some(model_id);
        }
        if let Some(output_format) = self.output_format {
            request.output_format = Some(output_format);
        }
        if let Some(overrides) = &self.voice_settings {
            let base = request.voice_settings.unwrap_or_default();
            request.voice_settings = Some(base.merge(overrides)?);
        }
        Ok(request)
    }
}

/// Audio generation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioGenerationResponse {
    /// Base64 (standard alphabet, padded) audio payload
    pub audio_base64: String,
    /// Output format of the payload
    pub format: OutputFormat,
    /// Voice used
    pub voice_id: Voice,
    /// Decoded payload length in bytes
    pub size_bytes: usize,
}

impl AudioGenerationResponse {
    pub fn from_bytes(audio: &[u8], format: OutputFormat, voice_id: Voice) -> Self {
        Self {
            audio_base64: STANDARD.encode(audio),
            format,
            voice_id,
            size_bytes: audio.len(),
        }
    }

    /// Decode the payload back into raw bytes
    pub fn decode_audio(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.audio_base64)
    }
}

/// Combined endpoint request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedGenerationRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<TextModel>,
    #[serde(default)]
    pub generate_audio: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_settings: Option<AudioSettings>,
}

/// Result of the optional audio stage
#[derive(Debug, Clone, PartialEq)]
pub enum AudioOutcome {
    /// Audio was not requested
    Skipped,
    Generated(AudioGenerationResponse),
    Failed {
        message: String,
        /// Serialized normalized error, when the failure carried a code
        details: Option<String>,
    },
}

/// Text result plus the outcome of the audio stage
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedGenerationResponse {
    pub text: TextGenerationResponse,
    pub audio: AudioOutcome,
}

impl CombinedGenerationResponse {
    pub fn audio(&self) -> Option<&AudioGenerationResponse> {
        match &self.audio {
            AudioOutcome::Generated(audio) => Some(audio),
            _ => None,
        }
    }

    pub fn audio_error(&self) -> Option<&str> {
        match &self.audio {
            AudioOutcome::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn audio_error_details(&self) -> Option<&str> {
        match &self.audio {
            AudioOutcome::Failed { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}

impl Serialize for CombinedGenerationResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("text", &self.text)?;
        match &self.audio {
            AudioOutcome::Skipped => {}
            AudioOutcome::Generated(audio) => map.serialize_entry("audio", audio)?,
            AudioOutcome::Failed { message, details } => {
                map.serialize_entry("audioError", message)?;
                if let Some(details) = details {
                    map.serialize_entry("audioErrorDetails", details)?;
                }
            }
        }
        map.end()
    }
}
