//! Configuration management for termchat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file, environment variables, and CLI
//! overrides, layered in that order.

use crate::error::{Result, TermchatError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for termchat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration (OpenAI, Azure)
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Chat history configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Default prompts used when the CLI supplies none
    #[serde(default)]
    pub prompts: PromptsConfig,
}

/// Which chat-completion backend to talk to
///
/// Deserialized from the config `type:` field; an unrecognized value is
/// a YAML parse error, which surfaces as a configuration error before
/// anything else runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// The public OpenAI API
    #[default]
    OpenAi,
    /// An Azure OpenAI deployment
    Azure,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Azure => write!(f, "azure"),
        }
    }
}

/// Provider configuration
///
/// Holds the selected backend plus the settings for every backend, so
/// switching `type:` never requires restructuring the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend to use
    #[serde(rename = "type", default)]
    pub kind: ProviderKind,

    /// OpenAI configuration
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Azure OpenAI configuration
    #[serde(default)]
    pub azure: AzureConfig,
}

impl ProviderConfig {
    /// Model name of the currently selected backend
    pub fn model(&self) -> &str {
        match self.kind {
            ProviderKind::OpenAi => &self.openai.model,
            ProviderKind::Azure => &self.azure.model,
        }
    }

    fn model_mut(&mut self) -> &mut String {
        match self.kind {
            ProviderKind::OpenAi => &mut self.openai.model,
            ProviderKind::Azure => &mut self.azure.model,
        }
    }
}

/// OpenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Model to request
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_openai_key_envvar")]
    pub api_key_envvar: String,

    /// Optional API base URL (useful for tests and local mocks)
    #[serde(default)]
    pub api_base: Option<String>,
}

fn default_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_openai_key_envvar() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_envvar: default_openai_key_envvar(),
            api_base: None,
        }
    }
}

/// Azure OpenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureConfig {
    /// Deployment (model) name to request
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_azure_key_envvar")]
    pub api_key_envvar: String,

    /// Environment variable holding the resource endpoint URL
    #[serde(default = "default_azure_endpoint_envvar")]
    pub endpoint_envvar: String,

    /// Azure API version query parameter
    #[serde(default = "default_azure_api_version")]
    pub api_version: String,
}

fn default_azure_key_envvar() -> String {
    "AZURE_OPENAI_API_KEY".to_string()
}

fn default_azure_endpoint_envvar() -> String {
    "AZURE_OPENAI_ENDPOINT".to_string()
}

fn default_azure_api_version() -> String {
    "2025-04-01-preview".to_string()
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_envvar: default_azure_key_envvar(),
            endpoint_envvar: default_azure_endpoint_envvar(),
            api_version: default_azure_api_version(),
        }
    }
}

/// Chat history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Path of the history file
    #[serde(default = "default_history_path")]
    pub path: PathBuf,

    /// Seconds of inactivity after which the history is discarded
    #[serde(default = "default_expire_seconds")]
    pub expire_seconds: u64,

    /// Maximum number of user/assistant turns kept in the window
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

fn default_history_path() -> PathBuf {
    PathBuf::from("history").join("default.json")
}

fn default_expire_seconds() -> u64 {
    600
}

fn default_max_turns() -> usize {
    20
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            expire_seconds: default_expire_seconds(),
            max_turns: default_max_turns(),
        }
    }
}

/// Default prompts, overridable from the CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// System prompt seeded into a fresh conversation
    #[serde(default)]
    pub system: String,

    /// User prompt used when the CLI supplies none
    #[serde(default)]
    pub user: String,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    /// A missing file is not an error; defaults are used.
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TermchatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TermchatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(kind) = std::env::var("TERMCHAT_PROVIDER") {
            match kind.to_lowercase().as_str() {
                "openai" => self.provider.kind = ProviderKind::OpenAi,
                "azure" => self.provider.kind = ProviderKind::Azure,
                _ => tracing::warn!("Invalid TERMCHAT_PROVIDER: {}", kind),
            }
        }

        if let Ok(model) = std::env::var("TERMCHAT_MODEL") {
            *self.provider.model_mut() = model;
        }

        if let Ok(path) = std::env::var("TERMCHAT_HISTORY_PATH") {
            self.history.path = PathBuf::from(path);
        }

        if let Ok(expire) = std::env::var("TERMCHAT_HISTORY_EXPIRE_SECONDS") {
            if let Ok(value) = expire.parse() {
                self.history.expire_seconds = value;
            } else {
                tracing::warn!("Invalid TERMCHAT_HISTORY_EXPIRE_SECONDS: {}", expire);
            }
        }

        if let Ok(max_turns) = std::env::var("TERMCHAT_MAX_TURNS") {
            if let Ok(value) = max_turns.parse() {
                self.history.max_turns = value;
            } else {
                tracing::warn!("Invalid TERMCHAT_MAX_TURNS: {}", max_turns);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(model) = &cli.model {
            *self.provider.model_mut() = model.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the selected backend has no
    /// model, a credential variable name is empty, or the history path
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        if self.provider.model().is_empty() {
            return Err(TermchatError::Config("model cannot be empty".to_string()).into());
        }

        let key_envvar = match self.provider.kind {
            ProviderKind::OpenAi => &self.provider.openai.api_key_envvar,
            ProviderKind::Azure => &self.provider.azure.api_key_envvar,
        };
        if key_envvar.is_empty() {
            return Err(
                TermchatError::Config("api_key_envvar cannot be empty".to_string()).into(),
            );
        }

        if self.provider.kind == ProviderKind::Azure && self.provider.azure.endpoint_envvar.is_empty()
        {
            return Err(
                TermchatError::Config("endpoint_envvar cannot be empty".to_string()).into(),
            );
        }

        if self.history.path.as_os_str().is_empty() {
            return Err(
                TermchatError::Config("history path cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
