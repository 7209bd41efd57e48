//! Base provider trait and common message types
//!
//! This module defines the CompletionProvider trait that all chat-completion
//! backends must implement, along with the message types exchanged with them
//! and persisted in the chat history.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a message within a conversation
///
/// Chat-completion APIs accept exactly these three roles; anything else in
/// a persisted history file fails deserialization and the history store
/// falls back to an empty conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the whole conversation; at most one per
    /// conversation, always at index 0
    System,
    /// A prompt from the person driving the CLI
    User,
    /// A reply produced by the completion provider
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in a conversation
///
/// Serializes to the `{role, content}` shape shared by the persisted
/// history file and the chat-completion wire format.
///
/// # Examples
///
/// ```
/// use termchat::providers::{Message, Role};
///
/// let msg = Message::user("Hello, assistant!");
/// assert_eq!(msg.role, Role::User);
/// assert_eq!(msg.content, "Hello, assistant!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Trait implemented by chat-completion backends
///
/// A provider is stateless request/response: it receives the full outgoing
/// message sequence and returns a single reply text (first choice only).
/// Conversation state lives entirely on the caller's side.
///
/// # Examples
///
/// ```
/// use termchat::providers::{CompletionProvider, Message};
/// use termchat::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl CompletionProvider for EchoProvider {
///     async fn complete(&self, _model: &str, messages: &[Message]) -> Result<String> {
///         Ok(messages.last().map(|m| m.content.clone()).unwrap_or_default())
///     }
///
///     fn name(&self) -> &str {
///         "echo"
///     }
/// }
/// ```
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Completes a conversation with the given messages
    ///
    /// # Arguments
    ///
    /// * `model` - Model identifier to request
    /// * `messages` - Full outgoing message sequence
    ///
    /// # Returns
    ///
    /// Returns the reply text of the first choice, whitespace-trimmed.
    /// A response carrying no choices or no content yields an empty
    /// string, not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response body cannot
    /// be parsed.
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String>;

    /// Short name of this provider, used in logs
    fn name(&self) -> &str;
}
