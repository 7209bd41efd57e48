//! Provider module for termchat
//!
//! This module contains the chat-completion provider abstraction and the
//! OpenAI and Azure OpenAI implementations.

pub mod azure;
pub mod base;
pub mod openai;

pub use azure::AzureProvider;
pub use base::{CompletionProvider, Message, Role};
pub use openai::OpenAiProvider;

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::Result;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration, including which backend to use
///
/// # Returns
///
/// Returns a boxed provider instance
///
/// # Errors
///
/// Returns error if provider initialization fails, typically because a
/// credential environment variable is not set.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn CompletionProvider>> {
    match config.kind {
        ProviderKind::OpenAi => Ok(Box::new(OpenAiProvider::new(config.openai.clone())?)),
        ProviderKind::Azure => Ok(Box::new(AzureProvider::new(config.azure.clone())?)),
    }
}
