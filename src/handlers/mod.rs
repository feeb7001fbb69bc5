//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod generate;
pub mod health;
pub mod templates;

use crate::config::{AppConfig, Settings};
use crate::middleware::logging::request_logging_middleware;
use crate::prompts::TemplateRegistry;
use crate::providers::{ElevenLabsClient, GeminiClient, SpeechSynthesizer, TextGenerator};
use crate::services::{AudioGenerationService, CombinedGenerator, TextGenerationService};
use crate::utils::error::{ApiError, AppError, ErrorCode};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit},
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub text_service: TextGenerationService,
    pub audio_service: AudioGenerationService,
    pub generator: CombinedGenerator,
    pub templates: TemplateRegistry,
}

impl AppState {
    /// Wire the services around the given upstream clients
    pub fn new(
        settings: Settings,
        templates: TemplateRegistry,
        text_generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let text_service = TextGenerationService::new(text_generator);
        let audio_service = AudioGenerationService::new(synthesizer);
        let generator = CombinedGenerator::new(text_service.clone(), audio_service.clone());

        Self {
            settings,
            text_service,
            audio_service,
            generator,
            templates,
        }
    }
}

/// Create application router backed by the Gemini and ElevenLabs clients
pub fn create_router(settings: Settings, app_config: &AppConfig) -> Result<Router> {
    let gemini = GeminiClient::new(settings.gemini.clone()).context("Failed to create Gemini client")?;
    let elevenlabs =
        ElevenLabsClient::new(settings.elevenlabs.clone()).context("Failed to create ElevenLabs client")?;
    let templates = app_config.template_registry()?;

    info!("{} prompt templates registered", templates.len());

    let state = AppState::new(settings, templates, Arc::new(gemini), Arc::new(elevenlabs));
    Ok(build_router(Arc::new(state)))
}

/// Assemble routes and middleware around an existing state
pub fn build_router(state: Arc<AppState>) -> Router {
    let security = &state.settings.security;
    let max_request_size = state.settings.request.max_request_size;

    let mut router = Router::new()
        .route("/api/generate", post(generate::generate))
        .route("/api/generate/text", post(generate::generate_text))
        .route("/api/generate/audio", post(generate::generate_audio))
        .route("/api/templates", get(templates::list_templates))
        .route("/api/templates/:id/render", post(templates::render_template))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(DefaultBodyLimit::max(max_request_size))
        .layer(TraceLayer::new_for_http());

    if security.cors_enabled {
        router = router.layer(cors_layer(&security.allowed_origins));
    }

    router.with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// Malformed bodies and unknown enum values are request validation errors.
/// Oversized bodies keep their 413 status.
pub(crate) fn invalid_body(rejection: JsonRejection) -> AppError {
    let status = rejection.status();
    warn!("Rejected request body ({}): {}", status, rejection.body_text());

    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(ErrorCode::InvalidRequest, rejection.body_text(), status.as_u16()).into();
    }
    AppError::Validation(rejection.body_text())
}
