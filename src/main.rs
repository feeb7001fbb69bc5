//! textvoice server
//!
//! HTTP service that turns prompts into text with Gemini and narrates the
//! result with ElevenLabs

use anyhow::{Context, Result};
use textvoice::config::settings::LoggingConfig;
use textvoice::{create_router, version_info, AppConfig, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load settings from environment (API keys, defaults, logging)
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("{}", version_info());

    // Optional JSON file: bind address and extra prompt templates
    let app_config = AppConfig::load_default().context("Failed to load configuration file")?;
    info!("📁 Configuration loaded");

    let app = create_router(settings, &app_config)?;

    let addr = app_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 textvoice server started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("🔄 Generate endpoint: http://{}/api/generate", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}

/// Initialize logging system
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")?;

    info!("Logging system initialized");
    Ok(())
}
