//! Conversation engine
//!
//! Orchestrates a single turn against one conversation: apply the expiry
//! policy, load the history, seed the system message, append the user
//! message, trim to the bounded window, dispatch to the provider, append
//! the reply, persist. Also provides a one-shot path that never touches
//! the history store.

use crate::error::Result;
use crate::history::{trim_messages, Conversation, HistoryStore};
use crate::providers::{CompletionProvider, Message, Role};

use std::time::Duration;

/// Parameters for one history-backed turn
#[derive(Debug, Clone)]
pub struct TurnRequest {
    /// System prompt to seed into a fresh conversation; ignored when the
    /// loaded history already carries a system message (the system
    /// prompt is sticky until history is cleared)
    pub system_prompt: String,
    /// The user's prompt for this turn
    pub user_prompt: String,
    /// Model identifier to request
    pub model: String,
    /// Maximum age of the history before it is discarded
    pub history_expire: Duration,
    /// Bounded-window size in turns
    pub max_turns: usize,
}

/// Engine driving one conversation through a provider
///
/// Holds no conversation state between calls; every turn reloads from
/// the store and persists the result wholesale.
///
/// # Examples
///
/// ```no_run
/// use termchat::engine::{ConversationEngine, TurnRequest};
/// use termchat::history::HistoryStore;
/// use termchat::providers::create_provider;
/// use termchat::config::Config;
/// use std::time::Duration;
///
/// # async fn example() -> termchat::error::Result<()> {
/// let config = Config::default();
/// let provider = create_provider(&config.provider)?;
/// let store = HistoryStore::new(&config.history.path);
/// let engine = ConversationEngine::new(provider, store);
///
/// let reply = engine
///     .run_turn(&TurnRequest {
///         system_prompt: "You are terse.".to_string(),
///         user_prompt: "Say hi.".to_string(),
///         model: config.provider.model().to_string(),
///         history_expire: Duration::from_secs(config.history.expire_seconds),
///         max_turns: config.history.max_turns,
///     })
///     .await?;
/// println!("{}", reply);
/// # Ok(())
/// # }
/// ```
pub struct ConversationEngine {
    provider: Box<dyn CompletionProvider>,
    store: HistoryStore,
}

impl ConversationEngine {
    /// Create an engine over a provider and a history store
    pub fn new(provider: Box<dyn CompletionProvider>, store: HistoryStore) -> Self {
        Self { provider, store }
    }

    /// Run one history-backed turn and return the reply text
    ///
    /// # Errors
    ///
    /// Provider failures propagate unchanged; no retry is attempted
    /// here. History read problems are recovered by the store, and a
    /// save failure after a successful reply is logged at warn level
    /// while the reply is still returned.
    pub async fn run_turn(&self, request: &TurnRequest) -> Result<String> {
        if self.store.is_expired(request.history_expire) {
            tracing::info!("chat history expired, starting a fresh conversation");
            self.store.clear();
        }

        let conversation = self.store.load();
        let mut messages = conversation.messages;

        if !messages.iter().any(|m| m.role == Role::System)
            && !request.system_prompt.trim().is_empty()
        {
            messages.insert(0, Message::system(request.system_prompt.clone()));
        }

        messages.push(Message::user(request.user_prompt.clone()));
        let mut messages = trim_messages(messages, request.max_turns);

        for message in &messages {
            tracing::debug!(role = %message.role, content = %message.content, "outgoing message");
        }

        let reply = self
            .provider
            .complete(&request.model, &messages)
            .await?;

        messages.push(Message::assistant(reply.clone()));

        let updated = Conversation {
            model: request.model.clone(),
            messages,
            updated_at: None,
        };
        if let Err(err) = self.store.save(&updated) {
            tracing::warn!(
                error = %err,
                "reply produced but chat history could not be saved"
            );
        }

        Ok(reply)
    }

    /// Run a single request without reading or writing history
    ///
    /// Builds a two-message sequence (system message omitted when the
    /// prompt is blank) and returns the reply text.
    pub async fn run_oneshot(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if !system_prompt.trim().is_empty() {
            messages.push(Message::system(system_prompt));
        }
        messages.push(Message::user(user_prompt));

        for message in &messages {
            tracing::debug!(role = %message.role, content = %message.content, "outgoing message");
        }

        self.provider.complete(model, &messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TermchatError;
    use crate::test_utils::temp_store;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Provider double that records every dispatch
    struct RecordingProvider {
        reply: String,
        fail: bool,
        calls: Arc<Mutex<Vec<Vec<Message>>>>,
    }

    impl RecordingProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                fail: false,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing() -> Self {
            Self {
                reply: String::new(),
                fail: true,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> Arc<Mutex<Vec<Vec<Message>>>> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl CompletionProvider for RecordingProvider {
        async fn complete(&self, _model: &str, messages: &[Message]) -> Result<String> {
            self.calls.lock().unwrap().push(messages.to_vec());
            if self.fail {
                return Err(TermchatError::Provider("boom".to_string()).into());
            }
            Ok(self.reply.clone())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn request(system_prompt: &str, user_prompt: &str) -> TurnRequest {
        TurnRequest {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            model: "test-model".to_string(),
            history_expire: Duration::from_secs(600),
            max_turns: 20,
        }
    }

    #[tokio::test]
    async fn test_first_turn_seeds_system_message() {
        let (_dir, store) = temp_store();
        let provider = RecordingProvider::new("Hi.");
        let calls = provider.calls();
        let engine = ConversationEngine::new(Box::new(provider), store.clone());

        let reply = engine
            .run_turn(&request("You are terse.", "Say hi."))
            .await
            .unwrap();

        assert_eq!(reply, "Hi.");
        let outgoing = &calls.lock().unwrap()[0];
        assert_eq!(outgoing.len(), 2);
        assert_eq!(outgoing[0], Message::system("You are terse."));
        assert_eq!(outgoing[1], Message::user("Say hi."));

        let saved = store.load();
        assert_eq!(saved.model, "test-model");
        assert_eq!(saved.messages.len(), 3);
        assert_eq!(saved.messages[2], Message::assistant("Hi."));
    }

    #[tokio::test]
    async fn test_blank_system_prompt_is_not_seeded() {
        let (_dir, store) = temp_store();
        let provider = RecordingProvider::new("ok");
        let calls = provider.calls();
        let engine = ConversationEngine::new(Box::new(provider), store);

        engine.run_turn(&request("   ", "hello")).await.unwrap();

        let outgoing = &calls.lock().unwrap()[0];
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_system_prompt_is_sticky() {
        let (_dir, store) = temp_store();
        store
            .save(&Conversation {
                model: "test-model".to_string(),
                messages: vec![Message::system("original"), Message::user("q"), Message::assistant("a")],
                updated_at: None,
            })
            .unwrap();

        let provider = RecordingProvider::new("ok");
        let calls = provider.calls();
        let engine = ConversationEngine::new(Box::new(provider), store);

        engine
            .run_turn(&request("changed later", "next question"))
            .await
            .unwrap();

        let outgoing = &calls.lock().unwrap()[0];
        assert_eq!(outgoing[0], Message::system("original"));
        assert!(!outgoing.iter().any(|m| m.content == "changed later"));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates_and_history_untouched() {
        let (_dir, store) = temp_store();
        let engine = ConversationEngine::new(Box::new(RecordingProvider::failing()), store.clone());

        let result = engine.run_turn(&request("", "hello")).await;
        assert!(result.is_err());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_oneshot_builds_system_and_user() {
        let (_dir, store) = temp_store();
        let provider = RecordingProvider::new("reply");
        let calls = provider.calls();
        let engine = ConversationEngine::new(Box::new(provider), store);

        let reply = engine
            .run_oneshot("You are terse.", "Say hi.", "test-model")
            .await
            .unwrap();

        assert_eq!(reply, "reply");
        let outgoing = &calls.lock().unwrap()[0];
        assert_eq!(outgoing.len(), 2);
        assert_eq!(outgoing[0].role, Role::System);
    }

    #[tokio::test]
    async fn test_oneshot_omits_blank_system_prompt() {
        let (_dir, store) = temp_store();
        let provider = RecordingProvider::new("reply");
        let calls = provider.calls();
        let engine = ConversationEngine::new(Box::new(provider), store);

        engine.run_oneshot("", "Say hi.", "test-model").await.unwrap();

        let outgoing = &calls.lock().unwrap()[0];
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_oneshot_never_touches_history() {
        let (_dir, store) = temp_store();
        let engine = ConversationEngine::new(Box::new(RecordingProvider::new("reply")), store.clone());

        engine.run_oneshot("s", "u", "m").await.unwrap();
        engine.run_oneshot("s", "u", "m").await.unwrap();

        assert!(!store.path().exists());
    }
}
