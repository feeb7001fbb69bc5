//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Configured default text model
    pub text_model: String,
    /// Configured default voice
    pub voice_id: String,
    /// Number of registered prompt templates
    pub templates: usize,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

fn response(status: &str, details: Option<HealthDetails>) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details,
    }
}

/// Basic health check
///
/// GET /health
/// Reports configuration without calling either upstream API
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    let details = HealthDetails {
        text_model: state.settings.gemini.default_model.to_string(),
        voice_id: state.settings.elevenlabs.default_voice.to_string(),
        templates: state.templates.len(),
        uptime_seconds: get_uptime_seconds(),
    };

    Json(response("healthy", Some(details)))
}

/// Liveness check
///
/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    debug!("Executing liveness check");
    Json(response("alive", None))
}

/// Get service uptime in seconds
fn get_uptime_seconds() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START_TIME: OnceLock<Instant> = OnceLock::new();

    START_TIME.get_or_init(Instant::now).elapsed().as_secs()
}
