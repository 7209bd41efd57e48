//! Bounded-window trimming of a message sequence
//!
//! One turn is a user message plus its assistant reply, so a window of
//! `max_turns` turns caps the non-system history at `2 * max_turns`
//! messages. Eviction is purely positional: oldest messages go first.

use crate::providers::{Message, Role};

/// Trim `messages` to at most `max_turns` turns, preserving the system message
///
/// The first system message (if any) always survives and stays at index 0;
/// any further system messages are dropped. Of the remaining messages the
/// newest `2 * max_turns` are kept in their original order. `max_turns == 0`
/// keeps only the system message. A trailing unanswered user message counts
/// like any other element; turn pairing is bookkeeping for the cap, not a
/// structural requirement on the input.
///
/// # Examples
///
/// ```
/// use termchat::history::trim_messages;
/// use termchat::providers::{Message, Role};
///
/// let messages = vec![
///     Message::system("You are terse."),
///     Message::user("one"),
///     Message::assistant("1"),
///     Message::user("two"),
///     Message::assistant("2"),
/// ];
/// let trimmed = trim_messages(messages, 1);
/// assert_eq!(trimmed.len(), 3);
/// assert_eq!(trimmed[0].role, Role::System);
/// assert_eq!(trimmed[1].content, "two");
/// ```
pub fn trim_messages(messages: Vec<Message>, max_turns: usize) -> Vec<Message> {
    if messages.is_empty() {
        return messages;
    }

    let mut system: Option<Message> = None;
    let mut rest: Vec<Message> = Vec::with_capacity(messages.len());
    for message in messages {
        if message.role == Role::System {
            if system.is_none() {
                system = Some(message);
            }
        } else {
            rest.push(message);
        }
    }

    let cap = max_turns.saturating_mul(2);
    if rest.len() > cap {
        rest.drain(..rest.len() - cap);
    }

    let mut trimmed = Vec::with_capacity(rest.len() + 1);
    if let Some(system) = system {
        trimmed.push(system);
    }
    trimmed.extend(rest);
    trimmed
}
