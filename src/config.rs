//! Configuration management for FridgeChef
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//!
//! The model credential is only ever taken from the environment
//! (`GOOGLE_API_KEY`); it is never read from or written to the YAML file.

use crate::bitmap::DEFAULT_MAX_IMAGE_BYTES;
use crate::error::{FridgechefError, Result};
use crate::panel::Panel;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Provider types understood by [`crate::providers::create_provider`]
pub const VALID_PROVIDERS: [&str; 2] = ["gemini", "ollama"];

/// Main configuration structure for FridgeChef
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model provider configuration
    pub provider: ProviderConfig,

    /// Session behavior configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Provider configuration
///
/// Specifies which model provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use ("gemini" or "ollama")
    #[serde(rename = "type")]
    pub provider_type: String,

    /// HTTP timeout for a single model call (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Google Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
}

fn default_timeout() -> u64 {
    120
}

/// Google Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use for Gemini
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (overridable for tests and proxies)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// API key, resolved from the environment at load time
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            api_key: None,
        }
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Vision model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llava:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

/// Session behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum size of an uploaded or captured image (bytes)
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Panel the interactive chat starts on
    #[serde(default = "default_panel")]
    pub default_panel: String,
}

fn default_max_image_bytes() -> usize {
    DEFAULT_MAX_IMAGE_BYTES
}

fn default_panel() -> String {
    "chat".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            default_panel: default_panel(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default_config()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn default_config() -> Self {
        Self {
            provider: ProviderConfig {
                provider_type: "gemini".to_string(),
                timeout_seconds: default_timeout(),
                gemini: GeminiConfig::default(),
                ollama: OllamaConfig::default(),
            },
            session: SessionConfig::default(),
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FridgechefError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| FridgechefError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an environment lookup function
    ///
    /// Split out from the process environment so overrides can be exercised
    /// without mutating global state.
    fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.provider.gemini.api_key = Some(api_key.trim().to_string());
        }

        if let Some(provider_type) = lookup("FRIDGECHEF_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Some(model) = lookup("FRIDGECHEF_GEMINI_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Some(api_base) = lookup("FRIDGECHEF_GEMINI_API_BASE") {
            self.provider.gemini.api_base = api_base;
        }

        if let Some(host) = lookup("FRIDGECHEF_OLLAMA_HOST") {
            self.provider.ollama.host = host;
        }

        if let Some(model) = lookup("FRIDGECHEF_OLLAMA_MODEL") {
            self.provider.ollama.model = model;
        }

        if let Some(timeout) = lookup("FRIDGECHEF_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid FRIDGECHEF_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Some(max_bytes) = lookup("FRIDGECHEF_MAX_IMAGE_BYTES") {
            if let Ok(value) = max_bytes.parse() {
                self.session.max_image_bytes = value;
            } else {
                tracing::warn!("Invalid FRIDGECHEF_MAX_IMAGE_BYTES: {}", max_bytes);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(provider) = cli.command.provider_override() {
            tracing::debug!("Using provider override: {}", provider);
            self.provider.provider_type = provider.to_string();
        }
    }

    /// Validate the configuration
    ///
    /// Ensures the provider is known, limits are positive, and the Gemini
    /// credential is present when Gemini is selected. A failure here is a
    /// fatal startup condition.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(
                FridgechefError::Config("Provider type cannot be empty".to_string()).into(),
            );
        }

        if !VALID_PROVIDERS.contains(&self.provider.provider_type.as_str()) {
            return Err(FridgechefError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                VALID_PROVIDERS.join(", ")
            ))
            .into());
        }

        if self.provider.timeout_seconds == 0 {
            return Err(FridgechefError::Config(
                "provider.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.session.max_image_bytes == 0 {
            return Err(FridgechefError::Config(
                "session.max_image_bytes must be greater than 0".to_string(),
            )
            .into());
        }

        if let Err(e) = Panel::parse_str(&self.session.default_panel) {
            return Err(FridgechefError::Config(format!("session.default_panel: {}", e)).into());
        }

        if self.provider.provider_type == "gemini" && self.provider.gemini.api_key.is_none() {
            return Err(FridgechefError::MissingCredentials(format!(
                "gemini. No Google API key found. Please set the {} environment variable.",
                API_KEY_ENV
            ))
            .into());
        }

        Ok(())
    }

    /// Panel the interactive chat opens on
    pub fn default_panel(&self) -> Panel {
        Panel::parse_str(&self.session.default_panel).unwrap_or(Panel::Chat)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
