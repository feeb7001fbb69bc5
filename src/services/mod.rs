//! Service layer module
//!
//! Text and audio generation services plus the combined orchestrator

pub mod audio;
pub mod combined;
pub mod text;

pub use audio::AudioGenerationService;
pub use combined::CombinedGenerator;
pub use text::TextGenerationService;
