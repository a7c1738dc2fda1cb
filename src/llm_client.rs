//! Chat-completion client used by the riddle generator.

use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Hosted model vendor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI chat completions.
    #[default]
    OpenAI,
    /// Anthropic messages API.
    Anthropic,
}

impl LlmProvider {
    /// Environment variable holding the API key for this vendor.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Model used when the configuration does not name one.
    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAI => "gpt-4o-mini",
            Self::Anthropic => "claude-3-5-haiku-20241022",
        }
    }
}

/// Connection settings for [`LlmClient`].
#[derive(Debug, Clone, Getters)]
pub struct LlmConfig {
    provider: LlmProvider,
    #[getter(skip)]
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl LlmConfig {
    /// Creates a configuration from explicit values.
    #[instrument(skip(api_key), fields(provider = ?provider, model = %model))]
    pub fn new(provider: LlmProvider, api_key: String, model: String, max_tokens: u32) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
        }
    }

    /// Creates a configuration reading the API key from the vendor's
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] if the variable is unset.
    #[instrument(fields(var = provider.api_key_var()))]
    pub fn from_env(
        provider: LlmProvider,
        model: String,
        max_tokens: u32,
    ) -> Result<Self, LlmError> {
        let api_key = std::env::var(provider.api_key_var()).map_err(|_| {
            LlmError::new(format!(
                "{} environment variable not set",
                provider.api_key_var()
            ))
        })?;
        Ok(Self::new(provider, api_key, model, max_tokens))
    }
}

/// Sends a system prompt and a user message to the configured vendor and
/// returns the text of the reply.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a client.
    #[instrument(skip(config), fields(provider = ?config.provider(), model = %config.model()))]
    pub fn new(config: LlmConfig) -> Self {
        info!("Creating LLM client");
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Returns the client's configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Requests a single completion.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] if the request fails, the vendor answers with a
    /// non-success status, or the reply carries no text.
    #[instrument(
        skip(self, system_prompt, user_message),
        fields(provider = ?self.config.provider, model = %self.config.model)
    )]
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let content = match self.config.provider {
            LlmProvider::OpenAI => self.complete_openai(system_prompt, user_message).await?,
            LlmProvider::Anthropic => self.complete_anthropic(system_prompt, user_message).await?,
        };
        info!(content_length = content.len(), "Completion received");
        Ok(content)
    }

    #[instrument(skip_all)]
    async fn complete_anthropic(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": system_prompt,
            "messages": [{ "role": "user", "content": user_message }],
        });

        debug!("Posting to Anthropic messages API");
        let response = self
            .http
            .post(ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Anthropic request failed");
                LlmError::new(format!("Anthropic request failed: {}", e))
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::new(format!("Failed to read Anthropic response: {}", e)))?;

        if !status.is_success() {
            error!(%status, response = %text, "Anthropic returned an error");
            return Err(LlmError::new(format!("Anthropic error {}: {}", status, text)));
        }

        let json: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| LlmError::new(format!("Failed to parse Anthropic response: {}", e)))?;

        json["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LlmError::new("Anthropic response has no text content".to_string()))
    }

    #[instrument(skip_all)]
    async fn complete_openai(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let config = OpenAIConfig::new().with_api_key(self.config.api_key.clone());
        let client = OpenAIClient::with_config(config);

        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()
            .map_err(|e| LlmError::new(format!("Failed to build system message: {}", e)))?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| LlmError::new(format!("Failed to build user message: {}", e)))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .max_tokens(self.config.max_tokens)
            .build()
            .map_err(|e| LlmError::new(format!("Failed to build request: {}", e)))?;

        debug!("Posting to OpenAI chat completions");
        let response = client.chat().create(request).await.map_err(|e| {
            error!(error = ?e, "OpenAI request failed");
            LlmError::new(format!("OpenAI request failed: {}", e))
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::new("OpenAI response has no content".to_string()))
    }
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
