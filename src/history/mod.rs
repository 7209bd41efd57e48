//! Chat history persistence and trimming
//!
//! This module owns the on-disk representation of one conversation and
//! the bounded-window invariant over its message sequence.

pub mod store;
pub mod trim;

pub use store::{Conversation, HistoryStore};
pub use trim::trim_messages;
