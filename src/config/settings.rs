//! Application configuration settings
//!
//! Vendor credentials, defaults and server limits loaded from the environment

use crate::models::{AudioModel, OutputFormat, TextModel, Voice};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing_subscriber::EnvFilter;

const REDACTED: &str = "[redacted]";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Gemini API configuration
    pub gemini: GeminiConfig,
    /// ElevenLabs API configuration
    pub elevenlabs: ElevenLabsConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Gemini API configuration
#[derive(Clone, Deserialize)]
pub struct GeminiConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Model used when a request does not name one
    pub default_model: TextModel,
    /// Request timeout in seconds (none: client default)
    pub timeout: Option<u64>,
}

/// ElevenLabs API configuration
#[derive(Clone, Deserialize)]
pub struct ElevenLabsConfig {
    /// API key, sent as the `xi-api-key` header
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    pub default_voice: Voice,
    pub default_model: AudioModel,
    pub default_format: OutputFormat,
    /// Request timeout in seconds (none: client default)
    pub timeout: Option<u64>,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &REDACTED)
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl fmt::Debug for ElevenLabsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElevenLabsConfig")
            .field("api_key", &REDACTED)
            .field("base_url", &self.base_url)
            .field("default_voice", &self.default_voice)
            .field("default_model", &self.default_model)
            .field("default_format", &self.default_format)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directive
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let timeout = match lookup("REQUEST_TIMEOUT") {
            Some(value) => Some(value.parse::<u64>().context("Invalid request timeout")?),
            None => None,
        };

        let settings = Self {
            gemini: GeminiConfig {
                api_key: lookup("GEMINI_API_KEY").context("GEMINI_API_KEY environment variable not set")?,
                base_url: get_or_default("GEMINI_BASE_URL", "https://generativelanguage.googleapis.com"),
                default_model: get_or_default("GEMINI_MODEL", TextModel::default().as_str())
                    .parse()
                    .context("Invalid GEMINI_MODEL")?,
                timeout,
            },
            elevenlabs: ElevenLabsConfig {
                api_key: lookup("ELEVENLABS_API_KEY").context("ELEVENLABS_API_KEY environment variable not set")?,
                base_url: get_or_default("ELEVENLABS_BASE_URL", "https://api.elevenlabs.io"),
                default_voice: get_or_default("ELEVENLABS_VOICE_ID", Voice::default().as_str())
                    .parse()
                    .context("Invalid ELEVENLABS_VOICE_ID")?,
                default_model: get_or_default("ELEVENLABS_MODEL_ID", AudioModel::default().as_str())
                    .parse()
                    .context("Invalid ELEVENLABS_MODEL_ID")?,
                default_format: get_or_default("ELEVENLABS_OUTPUT_FORMAT", OutputFormat::default().as_str())
                    .parse()
                    .context("Invalid ELEVENLABS_OUTPUT_FORMAT")?,
                timeout,
            },
            request: RequestConfig {
                max_request_size: get_or_default("MAX_REQUEST_SIZE", "1048576")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: get_or_default("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: get_or_default("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get_or_default("RUST_LOG", "info"),
                format: get_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        validate_api_key("GEMINI_API_KEY", &self.gemini.api_key)?;
        validate_api_key("ELEVENLABS_API_KEY", &self.elevenlabs.api_key)?;

        // Validate URL format
        for (name, url) in [
            ("GEMINI_BASE_URL", &self.gemini.base_url),
            ("ELEVENLABS_BASE_URL", &self.elevenlabs.base_url),
        ] {
            if !url.starts_with("http") {
                anyhow::bail!("Invalid {} format, should start with 'http'", name);
            }
        }

        if self.gemini.timeout == Some(0) {
            anyhow::bail!("Timeout values cannot be 0");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("Invalid log level: {}", self.logging.level))?;

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

fn validate_api_key(name: &str, key: &str) -> Result<()> {
    if key.is_empty() {
        anyhow::bail!("{} cannot be empty", name);
    }
    if key.contains(char::is_whitespace) {
        anyhow::bail!("{} cannot contain whitespace characters", name);
    }
    Ok(())
}
