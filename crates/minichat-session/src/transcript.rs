//! Ordered conversation transcript.

use minichat_types::{Message, GREETING_TEXT};

use crate::clock;

/// Ordered sequence of exchanged messages, insertion-order significant.
///
/// Never empty: position zero is always the synthetic bot greeting.
/// Messages are appended only; a reset replaces the whole sequence with a
/// fresh greeting.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript holding the single greeting.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![Message::bot(GREETING_TEXT, clock::time_label())],
        }
    }

    /// Append a user message stamped with the current local time.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text, clock::time_label()));
    }

    /// Append a bot message stamped with the current local time.
    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.messages.push(Message::bot(text, clock::time_label()));
    }

    /// All messages in insertion order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages, greeting included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True while the conversation holds nothing beyond the greeting.
    /// The next send carries the `refresh` flag in that case.
    #[must_use]
    pub fn is_opening(&self) -> bool {
        self.messages.len() <= 1
    }

    /// Drop everything and start over with a fresh greeting.
    pub fn reset(&mut self) {
        self.messages = vec![Message::bot(GREETING_TEXT, clock::time_label())];
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
