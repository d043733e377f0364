//! HTTP transport to the chat backend.

use async_trait::async_trait;
use gloo_net::http::Request;
use minichat_session::{BackendError, ChatBackend};
use minichat_types::{ChatReply, ChatRequest, EndSessionRequest};

/// [`ChatBackend`] speaking JSON over HTTP POST.
pub struct HttpBackend {
    chat_url: String,
    end_url: String,
}

impl HttpBackend {
    pub fn new(chat_url: impl Into<String>, end_url: impl Into<String>) -> Self {
        Self {
            chat_url: chat_url.into(),
            end_url: end_url.into(),
        }
    }
}

#[async_trait(?Send)]
impl ChatBackend for HttpBackend {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        log::debug!("POST {} (refresh: {})", self.chat_url, request.refresh);

        let response = Request::post(&self.chat_url)
            .json(request)
            .map_err(|e| BackendError::Request(format!("{:?}", e)))?
            .send()
            .await
            .map_err(|e| BackendError::Request(format!("{:?}", e)))?;

        if !response.ok() {
            return Err(BackendError::Status(response.status()));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| BackendError::Decode(format!("{:?}", e)))
    }

    async fn end_session(&self, request: &EndSessionRequest) -> Result<(), BackendError> {
        log::debug!("POST {}", self.end_url);

        let response = Request::post(&self.end_url)
            .json(request)
            .map_err(|e| BackendError::Request(format!("{:?}", e)))?
            .send()
            .await
            .map_err(|e| BackendError::Request(format!("{:?}", e)))?;

        // any 2xx is success; the body is intentionally not consumed
        if response.ok() {
            Ok(())
        } else {
            Err(BackendError::Status(response.status()))
        }
    }
}
