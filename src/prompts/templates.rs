//! Prompt template definitions and registry

use anyhow::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A named prompt template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Lookup identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Template text with `{name}` placeholders
    pub template: String,
    /// Declared variable names
    #[serde(default)]
    pub variables: Vec<String>,
}

impl PromptTemplate {
    pub fn new(id: &str, name: &str, template: &str, variables: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            template: template.to_string(),
            variables: variables.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Templates shipped with the service
pub fn builtin_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate::new(
            "story",
            "Short Story",
            "Write a short story about {topic} for {audience}. Keep it under {length} words.",
            &["topic", "audience", "length"],
        ),
        PromptTemplate::new(
            "podcast-intro",
            "Podcast Intro",
            "Write a warm, energetic podcast introduction for an episode titled \"{title}\" hosted by {host}. The episode covers {topic}.",
            &["title", "host", "topic"],
        ),
        PromptTemplate::new(
            "product-description",
            "Product Description",
            "Write a compelling product description for {product}. Highlight these features: {features}. Use a {tone} tone.",
            &["product", "features", "tone"],
        ),
        PromptTemplate::new(
            "explain",
            "Explain Simply",
            "Explain {concept} in simple terms that {audience} could understand, in no more than three paragraphs.",
            &["concept", "audience"],
        ),
    ]
}

static BUILTIN_REGISTRY: Lazy<TemplateRegistry> = Lazy::new(|| TemplateRegistry {
    templates: builtin_templates(),
});

/// Immutable set of templates addressed by id
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRegistry {
    templates: Vec<PromptTemplate>,
}

impl TemplateRegistry {
    /// Registry holding only the built-in templates
    pub fn builtin() -> &'static TemplateRegistry {
        &BUILTIN_REGISTRY
    }

    /// Built-in templates plus `extra`; ids must be unique across both
    pub fn with_templates(extra: Vec<PromptTemplate>) -> Result<Self> {
        let mut templates = builtin_templates();
        let mut seen: HashSet<String> = templates.iter().map(|t| t.id.clone()).collect();

        for template in extra {
            if template.id.is_empty() {
                anyhow::bail!("Prompt template id cannot be empty");
            }
            if !seen.insert(template.id.clone()) {
                anyhow::bail!("Duplicate prompt template id: {}", template.id);
            }
            debug!("Registered prompt template: {}", template.id);
            templates.push(template);
        }

        Ok(Self { templates })
    }

    pub fn get(&self, id: &str) -> Option<&PromptTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn list(&self) -> &[PromptTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
