//! Azure OpenAI provider implementation
//!
//! Connects to an Azure OpenAI deployment. Azure differs from the plain
//! OpenAI surface in three ways: the endpoint host comes from the
//! environment, the key travels in an `api-key` header instead of a bearer
//! token, and the deployment name (the model) is part of the URL path.

use crate::config::AzureConfig;
use crate::error::{Result, TermchatError};
use crate::providers::{CompletionProvider, Message};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout for a single completion request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Azure OpenAI chat-completion provider
///
/// Both the API key and the resource endpoint are read from the
/// environment variables named in the configuration at construction time;
/// either one missing is a configuration error raised before any network
/// I/O.
#[derive(Debug)]
pub struct AzureProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    api_version: String,
}

/// Request body for the chat completions endpoint
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: &'a [Message],
}

/// Response body from the chat completions endpoint
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl AzureProvider {
    /// Create a new Azure OpenAI provider instance
    ///
    /// # Errors
    ///
    /// Returns `TermchatError::MissingCredentials` if the configured key
    /// or endpoint environment variable is not set, and a provider error
    /// if the HTTP client cannot be constructed.
    pub fn new(config: AzureConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_envvar)
            .map_err(|_| TermchatError::MissingCredentials(config.api_key_envvar.clone()))?;
        let endpoint = std::env::var(&config.endpoint_envvar)
            .map_err(|_| TermchatError::MissingCredentials(config.endpoint_envvar.clone()))?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("termchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TermchatError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!(endpoint = %endpoint, api_version = %config.api_version, "initialized Azure provider");

        Ok(Self {
            client,
            api_key,
            endpoint,
            api_version: config.api_version,
        })
    }

    /// Build the deployment-scoped completions URL for `model`
    fn completions_url(&self, model: &str) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            model,
            self.api_version
        )
    }
}

#[async_trait]
impl CompletionProvider for AzureProvider {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String> {
        let request = ChatRequest { messages };

        tracing::debug!(
            model,
            message_count = messages.len(),
            "sending Azure completion request"
        );

        let response = self
            .client
            .post(self.completions_url(model))
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TermchatError::Provider(format!("Azure request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "Azure returned an error response");
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(
                    TermchatError::Authentication(format!("Azure rejected the API key: {}", body))
                        .into(),
                );
            }
            return Err(
                TermchatError::Provider(format!("Azure returned {}: {}", status, body)).into(),
            );
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| TermchatError::Provider(format!("Failed to parse Azure response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }

    fn name(&self) -> &str {
        "azure"
    }
}
