//! Core types and structures for minichat
//!
//! This crate provides the data model shared by the session manager and
//! the browser widget, plus the JSON wire types spoken to the chat
//! backend.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Synthetic bot greeting that opens every conversation
pub const GREETING_TEXT: &str = "Hi There..!";

/// Fixed bot reply substituted into the transcript when a send fails
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Storage key the session identifier is persisted under
pub const SESSION_ID_KEY: &str = "session_id";

// ============================================================================
// Session Types
// ============================================================================

/// Session ID type (UUID as string)
pub type SessionId = String;

/// Originator of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A single transcript entry. Immutable once created; the transcript is
/// append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// Formatted local wall-clock time, e.g. "14:05"
    pub time: String,
}

impl Message {
    pub fn user(text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            time: time.into(),
        }
    }

    pub fn bot(text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            time: time.into(),
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Helper function to deserialize string or null values
pub fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

/// Body of the send-message POST
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: SessionId,
    /// True when the conversation has no completed user turn yet
    pub refresh: bool,
}

/// Reply from the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// Bot reply text; may contain markdown rendered client-side
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub response: String,
    /// Server-assigned session override
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<SessionId>,
}

/// Body of the end-session POST
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndSessionRequest {
    pub session_id: SessionId,
    pub full_conversation: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_serializes_lowercase() {
        let msg = Message::user("hello", "09:30");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender"], "user");
        assert_eq!(json["text"], "hello");
        assert_eq!(json["time"], "09:30");

        let bot = Message::bot("hi", "09:31");
        assert_eq!(serde_json::to_value(&bot).unwrap()["sender"], "bot");
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let req = ChatRequest {
            message: "hello".to_string(),
            session_id: "abc-123".to_string(),
            refresh: true,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], "hello");
        assert_eq!(json["session_id"], "abc-123");
        assert_eq!(json["refresh"], true);
    }

    #[test]
    fn test_chat_reply_optional_session_id() {
        let reply: ChatReply = serde_json::from_str(r#"{"response":"ok"}"#).unwrap();
        assert_eq!(reply.response, "ok");
        assert!(reply.session_id.is_none());

        let reply: ChatReply =
            serde_json::from_str(r#"{"response":"ok","session_id":"next-42"}"#).unwrap();
        assert_eq!(reply.session_id.as_deref(), Some("next-42"));
    }

    #[test]
    fn test_chat_reply_null_response() {
        let reply: ChatReply = serde_json::from_str(r#"{"response":null}"#).unwrap();
        assert_eq!(reply.response, "");
    }

    #[test]
    fn test_end_session_request_round_trips_transcript() {
        let req = EndSessionRequest {
            session_id: "abc-123".to_string(),
            full_conversation: vec![
                Message::bot(GREETING_TEXT, "09:00"),
                Message::user("hello", "09:01"),
            ],
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: EndSessionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.full_conversation.len(), 2);
        assert_eq!(back.full_conversation[0].sender, Sender::Bot);
        assert_eq!(back.full_conversation[1].text, "hello");
    }
}
