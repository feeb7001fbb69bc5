//! File-based configuration loading
//!
//! Loads the server bind address and extra prompt templates from a JSON file

use crate::prompts::{PromptTemplate, TemplateRegistry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host (default: "127.0.0.1" - localhost only)
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Application configuration loaded from JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration (optional, defaults to localhost:3000)
    #[serde(default)]
    pub server: ServerConfig,

    /// Prompt templates added to the built-in set
    #[serde(default)]
    pub templates: Vec<PromptTemplate>,
}

impl AppConfig {
    /// Load configuration from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| "Failed to parse config JSON")?;

        config.validate()?;

        debug!("Loaded {} custom prompt templates", config.templates.len());
        Ok(config)
    }

    /// Load configuration from default locations
    /// Searches in order:
    /// 1. $TEXTVOICE_CONFIG
    /// 2. ~/.config/textvoice/textvoice.json
    /// 3. ./textvoice.json
    ///
    /// Falls back to defaults when no file exists. An explicit
    /// `TEXTVOICE_CONFIG` that does not exist is an error.
    pub fn load_default() -> Result<Self> {
        if let Ok(explicit) = std::env::var("TEXTVOICE_CONFIG") {
            return Self::load(Path::new(&explicit));
        }

        match Self::default_locations().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load(&path),
            None => {
                info!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn default_locations() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("textvoice").join("textvoice.json"));
        }
        paths.push(PathBuf::from("textvoice.json"));
        paths
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        for template in &self.templates {
            if template.template.is_empty() {
                anyhow::bail!("Prompt template '{}' has an empty template string", template.id);
            }
        }

        self.template_registry().map(|_| ())
    }

    /// Built-in templates plus the configured ones
    pub fn template_registry(&self) -> Result<TemplateRegistry> {
        TemplateRegistry::with_templates(self.templates.clone())
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
