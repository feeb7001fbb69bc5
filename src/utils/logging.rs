//! Logging utilities
//!
//! Shared logging configuration and helper functions

use crate::models::{AudioGenerationRequest, CombinedGenerationRequest, TextGenerationRequest};

/// Set to true to log prompts and narration text in full
/// Default is false to reduce log verbosity
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Truncate a string with a note about original length
///
/// Cuts on a char boundary, so `max_len` is a byte budget that may be undershot.
pub fn truncate_content(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut cut = max_len;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}... ({} chars truncated)", &s[..cut], s.len() - cut)
}

fn summarize_text(text: &str, max_len: usize) -> serde_json::Value {
    if VERBOSE_REQUEST_LOGGING {
        serde_json::Value::String(text.to_string())
    } else {
        serde_json::Value::String(truncate_content(text, max_len))
    }
}

/// Create a filtered summary of a combined request for logging
pub fn create_request_log_summary(request: &CombinedGenerationRequest) -> serde_json::Value {
    serde_json::json!({
        "prompt": request.prompt.as_deref().map(|p| summarize_text(p, 200)),
        "model": request.model,
        "generateAudio": request.generate_audio,
        "voiceId": request.voice_id,
        "audioSettings": request.audio_settings,
    })
}

/// Create a filtered summary of a text request for logging
pub fn create_text_request_log_summary(request: &TextGenerationRequest) -> serde_json::Value {
    serde_json::json!({
        "prompt": summarize_text(&request.prompt, 200),
        "model": request.model,
    })
}

/// Create a filtered summary of an audio request for logging
pub fn create_audio_request_log_summary(request: &AudioGenerationRequest) -> serde_json::Value {
    serde_json::json!({
        "text": summarize_text(&request.text, 100),
        "textLength": request.text.len(),
        "voiceId": request.voice_id,
        "modelId": request.model_id,
        "outputFormat": request.output_format,
    })
}
