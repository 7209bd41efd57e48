//! Test utilities for termchat
//!
//! Common helpers for unit tests: temporary history stores and message
//! sequence builders.

use crate::history::HistoryStore;
use crate::providers::Message;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// The directory is cleaned up when the returned handle is dropped.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a history store backed by a file in a fresh temporary directory
///
/// Returns the directory handle alongside the store; dropping the handle
/// removes the backing file.
pub fn temp_store() -> (TempDir, HistoryStore) {
    let dir = temp_dir();
    let store = HistoryStore::new(dir.path().join("default.json"));
    (dir, store)
}

/// Build `count` complete turns (user + assistant pairs)
///
/// Contents are numbered (`question 0`, `answer 0`, ...) so tests can
/// assert which end of the window survived trimming.
pub fn sample_turns(count: usize) -> Vec<Message> {
    let mut messages = Vec::with_capacity(count * 2);
    for i in 0..count {
        messages.push(Message::user(format!("question {}", i)));
        messages.push(Message::assistant(format!("answer {}", i)));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Role;

    #[test]
    fn test_temp_store_points_into_temp_dir() {
        let (dir, store) = temp_store();
        assert!(store.path().starts_with(dir.path()));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_sample_turns_alternate_roles() {
        let turns = sample_turns(2);
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[3].content, "answer 1");
    }
}
