//! ElevenLabs API data models
//!
//! Request and error structures for `v1/text-to-speech/{voice_id}`

use super::generation::VoiceSettings;
use serde::{Deserialize, Serialize};

/// text-to-speech request body
#[derive(Debug, Clone, Serialize)]
pub struct TextToSpeechRequest<'a> {
    pub text: &'a str,
    pub model_id: &'a str,
    pub voice_settings: ElevenLabsVoiceSettings,
}

/// Voice settings in the vendor's snake_case layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevenLabsVoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl From<VoiceSettings> for ElevenLabsVoiceSettings {
    fn from(settings: VoiceSettings) -> Self {
        Self {
            stability: settings.stability,
            similarity_boost: settings.similarity_boost,
            style: settings.style,
            use_speaker_boost: settings.use_speaker_boost,
        }
    }
}

/// Error body, e.g. `{"detail": {"status": "invalid_api_key", "message": "..."}}`
///
/// `detail` is a string for some validation failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsErrorResponse {
    pub detail: ElevenLabsErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ElevenLabsErrorDetail {
    Structured {
        status: Option<String>,
        message: String,
    },
    Text(String),
    Other(serde_json::Value),
}

impl ElevenLabsErrorDetail {
    pub fn message(&self) -> Option<&str> {
        match self {
            ElevenLabsErrorDetail::Structured { message, .. } => Some(message),
            ElevenLabsErrorDetail::Text(text) => Some(text),
            ElevenLabsErrorDetail::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_vendor_field_names() {
        let request = TextToSpeechRequest {
            text: "hi",
            model_id: "eleven_multilingual_v2",
            voice_settings: VoiceSettings::default().into(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model_id"], "eleven_multilingual_v2");
        assert_eq!(json["voice_settings"]["similarity_boost"], 0.75);
        assert_eq!(json["voice_settings"]["use_speaker_boost"], true);
    }

    #[test]
    fn test_error_detail_variants() {
        let structured: ElevenLabsErrorResponse = serde_json::from_str(
            r#"{"detail": {"status": "invalid_api_key", "message": "Invalid API key"}}"#,
        )
        .unwrap();
        assert_eq!(structured.detail.message(), Some("Invalid API key"));

        let text: ElevenLabsErrorResponse = serde_json::from_str(r#"{"detail": "Not found"}"#).unwrap();
        assert_eq!(text.detail.message(), Some("Not found"));

        let other: ElevenLabsErrorResponse = serde_json::from_str(r#"{"detail": [{"loc": ["body"]}]}"#).unwrap();
        assert!(other.detail.message().is_none());
    }
}
