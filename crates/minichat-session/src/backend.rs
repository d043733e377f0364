//! Chat backend transport port.

use async_trait::async_trait;
use minichat_types::{ChatReply, ChatRequest, EndSessionRequest};
use thiserror::Error;

/// Transport failure.
///
/// Never shown to the user as such: the manager absorbs a send failure
/// into the fixed fallback reply and an end failure into a log line.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Transport port for the two chat endpoints.
///
/// `?Send` futures: the widget runs single-threaded on the browser event
/// loop.
#[async_trait(?Send)]
pub trait ChatBackend {
    /// POST the user message, returning the bot reply.
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, BackendError>;

    /// POST the full transcript to close the session. Any 2xx status is
    /// success; the response body is not consumed.
    async fn end_session(&self, request: &EndSessionRequest) -> Result<(), BackendError>;
}
