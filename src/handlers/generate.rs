//! Generation handlers
//!
//! Combined text + audio, text only and audio only endpoints

use crate::handlers::{invalid_body, AppState};
use crate::models::{
    AudioGenerationRequest, AudioGenerationResponse, CombinedGenerationRequest,
    CombinedGenerationResponse, TextGenerationRequest, TextGenerationResponse,
};
use crate::utils::error::AppResult;
use crate::utils::logging::{
    create_audio_request_log_summary, create_request_log_summary, create_text_request_log_summary,
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::debug;

/// Handle combined generation requests
///
/// POST /api/generate
///
/// Text errors fail the request; audio errors are reported in `audioError`.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CombinedGenerationRequest>, JsonRejection>,
) -> AppResult<Json<CombinedGenerationResponse>> {
    let Json(request) = payload.map_err(invalid_body)?;

    let log_summary = create_request_log_summary(&request);
    if let Ok(summary_json) = serde_json::to_string_pretty(&log_summary) {
        debug!("📥 Generate request:\n{}", summary_json);
    }

    let response = state.generator.generate(request).await?;
    Ok(Json(response))
}

/// Handle text-only generation requests
///
/// POST /api/generate/text
pub async fn generate_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TextGenerationRequest>, JsonRejection>,
) -> AppResult<Json<TextGenerationResponse>> {
    let Json(request) = payload.map_err(invalid_body)?;
    debug!("📥 Text request: {}", create_text_request_log_summary(&request));

    let response = state.text_service.generate(&request).await?;
    Ok(Json(response))
}

/// Handle audio-only generation requests
///
/// POST /api/generate/audio
pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AudioGenerationRequest>, JsonRejection>,
) -> AppResult<Json<AudioGenerationResponse>> {
    let Json(request) = payload.map_err(invalid_body)?;
    debug!("📥 Audio request: {}", create_audio_request_log_summary(&request));

    let response = state.audio_service.generate(&request).await?;
    Ok(Json(response))
}
