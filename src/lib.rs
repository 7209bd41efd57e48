//! termchat - Simple AI assistant for your terminal
//!
//! This library turns a prompt from the CLI or a YAML config file into a
//! single chat-completion call and keeps a bounded, expiring conversation
//! history between invocations.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `engine`: Orchestrates one conversation turn (or a one-shot request)
//! - `history`: On-disk conversation store and bounded-window trimming
//! - `providers`: Chat-completion provider abstraction (OpenAI, Azure)
//! - `meta`: Meta-variable expansion for prompt text
//! - `prompts`: Prompt resolution from CLI and config sources
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use termchat::{Config, ConversationEngine, HistoryStore};
//! use termchat::providers::create_provider;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider)?;
//!     let store = HistoryStore::new(&config.history.path);
//!     let engine = ConversationEngine::new(provider, store);
//!
//!     let reply = engine.run_oneshot("", "Say hi.", config.provider.model()).await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod meta;
pub mod prompts;
pub mod providers;

// Re-export commonly used types
pub use config::Config;
pub use engine::{ConversationEngine, TurnRequest};
pub use error::{Result, TermchatError};
pub use history::{Conversation, HistoryStore};
pub use providers::{CompletionProvider, Message, Role};

#[cfg(test)]
pub mod test_utils;
