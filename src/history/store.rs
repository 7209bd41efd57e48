//! On-disk chat history store
//!
//! One conversation maps to one JSON file. The store is deliberately
//! fail-soft on the read side: a missing or corrupt file yields an empty
//! conversation so a broken history can never block further use of the
//! assistant. Write failures are real errors and are returned to the
//! caller.

use crate::error::{Result, TermchatError};
use crate::providers::Message;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// The full persisted state of one chat session
///
/// All fields carry serde defaults so partially written or legacy files
/// still load. `updated_at` is stamped on every save and is `None` only
/// for a conversation that has never been persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    /// Model identifier the conversation was last run against
    #[serde(default)]
    pub model: String,

    /// Ordered message sequence; at most one system message, at index 0
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Moment the conversation was last persisted (RFC-3339 UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Store for a single conversation at an explicit path
///
/// The path is a constructor argument rather than a module constant so
/// multiple named conversations can coexist and tests can point the store
/// at a temporary directory.
///
/// # Examples
///
/// ```no_run
/// use termchat::history::HistoryStore;
///
/// let store = HistoryStore::new("history/default.json");
/// let conversation = store.load();
/// println!("{} messages on disk", conversation.messages.len());
/// ```
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Create a store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying history file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the conversation, treating any failure as an empty one
    ///
    /// A missing file is the normal empty case. Unreadable or corrupt
    /// content is self-healed to an empty conversation; the cause is
    /// logged at warn level and never propagated.
    pub fn load(&self) -> Conversation {
        match self.try_load() {
            Ok(Some(conversation)) => conversation,
            Ok(None) => Conversation::default(),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "history file unreadable, starting a fresh conversation"
                );
                Conversation::default()
            }
        }
    }

    /// Fallible read, `Ok(None)` when the file does not exist
    fn try_load(&self) -> Result<Option<Conversation>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let conversation = serde_json::from_str(&contents)?;
        Ok(Some(conversation))
    }

    /// Persist the conversation, fully overwriting prior content
    ///
    /// Stamps `updated_at` with the current UTC time and creates the
    /// containing directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `TermchatError::History` if the directory cannot be
    /// created or the file cannot be written.
    pub fn save(&self, conversation: &Conversation) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    TermchatError::History(format!(
                        "Failed to create history directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let record = Conversation {
            model: conversation.model.clone(),
            messages: conversation.messages.clone(),
            updated_at: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| TermchatError::History(format!("Failed to serialize history: {}", e)))?;

        fs::write(&self.path, json).map_err(|e| {
            TermchatError::History(format!(
                "Failed to write history file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            message_count = record.messages.len(),
            "saved chat history"
        );
        Ok(())
    }

    /// Best-effort removal of the history file
    ///
    /// A missing file is success. Any other failure is logged at warn
    /// level and swallowed; this operation is defined to never fail.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "removed chat history");
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to remove chat history"
                );
            }
        }
    }

    /// Whether the history file is older than `max_age`
    ///
    /// Returns false when the file does not exist (nothing to expire) and
    /// true when its modification time cannot be determined — a history
    /// of unknown freshness is safer discarded than continued.
    pub fn is_expired(&self, max_age: Duration) -> bool {
        if !self.path.exists() {
            return false;
        }

        let modified = match fs::metadata(&self.path).and_then(|meta| meta.modified()) {
            Ok(modified) => modified,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "cannot read history modification time, treating as expired"
                );
                return true;
            }
        };

        match SystemTime::now().duration_since(modified) {
            Ok(elapsed) => elapsed > max_age,
            // Modification time in the future: clock skew, not expiry.
            Err(_) => false,
        }
    }
}
