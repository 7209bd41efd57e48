//! OpenAI provider implementation
//!
//! Connects to the OpenAI chat-completions endpoint (or any server exposing
//! the same API surface via `api_base`) to generate a single reply for the
//! outgoing message sequence.

use crate::config::OpenAiConfig;
use crate::error::{Result, TermchatError};
use crate::providers::{CompletionProvider, Message};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenAI API base URL
const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Timeout for a single completion request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI chat-completion provider
///
/// The API key is read from the environment variable named in the
/// configuration at construction time, so a missing credential surfaces
/// as a configuration error before any network I/O happens.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    api_base: String,
}

/// Request body for the chat completions endpoint
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

/// Response body from the chat completions endpoint
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// A single completion choice
#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// The message inside a completion choice
#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider instance
    ///
    /// # Errors
    ///
    /// Returns `TermchatError::MissingCredentials` if the configured API
    /// key environment variable is not set, and a provider error if the
    /// HTTP client cannot be constructed.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_envvar)
            .map_err(|_| TermchatError::MissingCredentials(config.api_key_envvar.clone()))?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("termchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TermchatError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        let api_base = config
            .api_base
            .unwrap_or_else(|| OPENAI_API_BASE.to_string());

        tracing::debug!(api_base = %api_base, "initialized OpenAI provider");

        Ok(Self {
            client,
            api_key,
            api_base,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String> {
        let request = ChatRequest { model, messages };

        tracing::debug!(
            model,
            message_count = messages.len(),
            "sending OpenAI completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TermchatError::Provider(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "OpenAI returned an error response");
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(
                    TermchatError::Authentication(format!("OpenAI rejected the API key: {}", body))
                        .into(),
                );
            }
            return Err(
                TermchatError::Provider(format!("OpenAI returned {}: {}", status, body)).into(),
            );
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| TermchatError::Provider(format!("Failed to parse OpenAI response: {}", e)))?;

        // First choice only; an absent choice or content is an empty reply.
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }

    fn name(&self) -> &str {
        "openai"
    }
}
