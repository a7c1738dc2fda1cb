//! Game configuration loaded from TOML.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::game::Difficulty;
use crate::llm_client::{LlmConfig, LlmProvider};

/// Settings for a play session.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Difficulty requested for every round.
    difficulty: Difficulty,

    /// LLM vendor used to generate riddles.
    llm_provider: LlmProvider,

    /// Model name. Falls back to the vendor's default when absent.
    #[setters(strip_option)]
    llm_model: Option<String>,

    /// Token budget for a riddle reply.
    llm_max_tokens: u32,

    /// SQLite database holding the high score.
    db_path: String,

    /// Optional TOML deck. When set, riddles come from the deck instead of
    /// the model.
    #[setters(strip_option)]
    deck: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            llm_provider: LlmProvider::OpenAI,
            llm_model: None,
            llm_max_tokens: 512,
            db_path: "cinesage.db".to_string(),
            deck: None,
        }
    }
}

impl GameConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid TOML or a field has
    /// an unknown value.
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(difficulty = %config.difficulty, provider = ?config.llm_provider, "Config loaded");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Model name, resolving the vendor default.
    #[instrument(skip(self))]
    pub fn resolved_model(&self) -> String {
        self.llm_model
            .clone()
            .unwrap_or_else(|| self.llm_provider.default_model().to_string())
    }

    /// Builds the LLM configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the vendor's API key variable is unset.
    #[instrument(skip(self), fields(provider = ?self.llm_provider))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        LlmConfig::from_env(self.llm_provider, self.resolved_model(), self.llm_max_tokens)
            .map_err(|e| ConfigError::new(e.message))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
