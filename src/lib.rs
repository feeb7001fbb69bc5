//! textvoice library
//!
//! Generates text with Gemini and, optionally, narrates it with ElevenLabs

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod prompts;
pub mod providers;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::{AppConfig, Settings};
pub use handlers::{build_router, create_router, AppState};
pub use prompts::{PromptBuilder, PromptTemplate, TemplateRegistry};
pub use providers::{ElevenLabsClient, GeminiClient, SpeechSynthesizer, TextGenerator};
pub use services::{AudioGenerationService, CombinedGenerator, TextGenerationService};
pub use utils::error::{ApiError, AppError, AppResult, ErrorCode};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
