//! Prompt templates module
//!
//! Named templates with `{name}` placeholders and the builder that fills them

pub mod builder;
pub mod templates;

use thiserror::Error;

pub use builder::PromptBuilder;
pub use templates::{PromptTemplate, TemplateRegistry};

/// Prompt building errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PromptError {
    /// No template registered under this id
    #[error("Prompt template not found: {0}")]
    TemplateNotFound(String),

    /// Placeholders left in the output after substitution
    #[error("Unresolved template variables: {}", .0.join(", "))]
    UnresolvedVariables(Vec<String>),
}
