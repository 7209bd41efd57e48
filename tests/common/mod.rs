//! Shared helpers for integration tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use termchat::error::Result;
use termchat::providers::{CompletionProvider, Message};

/// In-process provider double returning a canned reply
///
/// Records every dispatch so tests can assert on the exact outgoing
/// message sequence.
pub struct FakeProvider {
    reply: String,
    calls: Arc<Mutex<Vec<(String, Vec<Message>)>>>,
}

impl FakeProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle onto the recorded (model, messages) dispatches
    pub fn calls(&self) -> Arc<Mutex<Vec<(String, Vec<Message>)>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "fake"
    }
}
