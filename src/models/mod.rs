//! Data models module
//!
//! Defines the service's request and response structures and the Gemini and
//! ElevenLabs wire formats

pub mod catalog;
pub mod elevenlabs;
pub mod gemini;
pub mod generation;

pub use catalog::{AudioModel, OutputFormat, TextModel, UnknownVariant, Voice};
pub use generation::*;
