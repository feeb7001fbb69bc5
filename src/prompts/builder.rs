//! Fluent prompt builder

use super::{PromptError, PromptTemplate, TemplateRegistry};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("valid placeholder regex"));

/// Builds a prompt string from a template and named variables
///
/// ```
/// use textvoice::prompts::{PromptBuilder, TemplateRegistry};
///
/// let prompt = PromptBuilder::new(TemplateRegistry::builtin(), "explain")
///     .unwrap()
///     .set("concept", "recursion")
///     .set("audience", "a ten-year-old")
///     .build()
///     .unwrap();
/// assert!(prompt.contains("recursion"));
/// ```
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template_id: String,
    template: String,
    declared: Vec<String>,
    values: BTreeMap<String, String>,
}

impl PromptBuilder {
    /// Look up `template_id` in `registry`
    pub fn new(registry: &TemplateRegistry, template_id: &str) -> Result<Self, PromptError> {
        registry
            .get(template_id)
            .map(Self::from_template)
            .ok_or_else(|| PromptError::TemplateNotFound(template_id.to_string()))
    }

    pub fn from_template(template: &PromptTemplate) -> Self {
        Self {
            template_id: template.id.clone(),
            template: template.template.clone(),
            declared: template.variables.clone(),
            values: BTreeMap::new(),
        }
    }

    /// Build from a raw template string with no id and no declared variables
    pub fn from_raw(template: impl Into<String>) -> Self {
        Self {
            template_id: String::new(),
            template: template.into(),
            declared: Vec::new(),
            values: BTreeMap::new(),
        }
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn set_many<I, K, V>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in variables {
            self.values.insert(name.into(), value.into());
        }
        self
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn declared_variables(&self) -> &[String] {
        &self.declared
    }

    /// Substitute every set variable and reject leftover placeholders
    pub fn build(&self) -> Result<String, PromptError> {
        let mut output = self.template.clone();
        for (name, value) in &self.values {
            output = output.replace(&format!("{{{}}}", name), value);
        }

        let mut unresolved: Vec<String> = Vec::new();
        for capture in PLACEHOLDER.captures_iter(&output) {
            let name = capture[1].to_string();
            if !unresolved.contains(&name) {
                unresolved.push(name);
            }
        }

        if unresolved.is_empty() {
            Ok(output)
        } else {
            Err(PromptError::UnresolvedVariables(unresolved))
        }
    }
}
