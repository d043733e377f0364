//! The session and conversation manager.

use log::{error, info, warn};
use minichat_types::{ChatReply, ChatRequest, EndSessionRequest, SessionId, FALLBACK_REPLY};

use crate::backend::{BackendError, ChatBackend};
use crate::ids::IdSource;
use crate::store::SessionStore;
use crate::transcript::Transcript;

/// Session and conversation manager.
///
/// Owns the persisted session identifier, the ordered transcript and the
/// flags gating the three external calls (send-message, reset-session,
/// end-session).
///
/// Each network operation is split into a synchronous `prepare_*` step
/// (validate, mutate state, build the request) and a synchronous
/// `apply_*` step (land the outcome), so a single-threaded UI never holds
/// a state borrow across an await. [`ChatSession::send_message`] and
/// [`ChatSession::end_session`] compose the two around a
/// [`ChatBackend`] call.
///
/// # Example
///
/// ```rust
/// use minichat_session::{ChatSession, MemoryStore, UuidSource};
///
/// let mut session = ChatSession::new(MemoryStore::new(), UuidSource);
/// session.ensure_session();
/// assert!(session.session_id().is_some());
/// ```
pub struct ChatSession<S, I> {
    store: S,
    ids: I,
    session_id: Option<SessionId>,
    transcript: Transcript,
    active: bool,
    busy: bool,
}

impl<S: SessionStore, I: IdSource> ChatSession<S, I> {
    /// Create a manager with an untouched transcript. The session id is
    /// not resolved until [`ChatSession::ensure_session`] runs.
    pub fn new(store: S, ids: I) -> Self {
        Self {
            store,
            ids,
            session_id: None,
            transcript: Transcript::new(),
            active: true,
            busy: false,
        }
    }

    /// Adopt the persisted session id, or mint and persist a fresh one.
    ///
    /// Idempotent: an id already resolved in this page load is never
    /// replaced here.
    pub fn ensure_session(&mut self) {
        if self.session_id.is_some() {
            return;
        }
        let id = match self.store.load().filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                let id = self.ids.new_session_id();
                self.store.store(&id);
                info!("created session {}", id);
                id
            }
        };
        self.session_id = Some(id);
    }

    /// Stage a send: validate the input, compute the `refresh` flag from
    /// the pre-append transcript, optimistically append the user message
    /// and mark the manager busy.
    ///
    /// Returns `None` for blank input or while another send is in
    /// flight; neither case touches the transcript or the wire.
    pub fn prepare_send(&mut self, text: &str) -> Option<ChatRequest> {
        if self.busy || text.trim().is_empty() {
            return None;
        }
        self.ensure_session();
        let session_id = self.session_id.clone()?;

        let refresh = self.transcript.is_opening();
        self.transcript.push_user(text);
        self.busy = true;

        Some(ChatRequest {
            message: text.to_string(),
            session_id,
            refresh,
        })
    }

    /// Land the outcome of a send.
    ///
    /// On success a server-assigned session id, when present, replaces
    /// the persisted one, and the bot reply is appended. Any failure is
    /// absorbed into the fixed fallback reply; no error escapes to the
    /// caller. Always clears the busy flag.
    pub fn apply_send(&mut self, outcome: Result<ChatReply, BackendError>) {
        match outcome {
            Ok(reply) => {
                if let Some(id) = reply.session_id.filter(|id| !id.is_empty()) {
                    self.store.store(&id);
                    self.session_id = Some(id);
                }
                self.transcript.push_bot(reply.response);
            }
            Err(err) => {
                error!("send failed: {}", err);
                self.transcript.push_bot(FALLBACK_REPLY);
            }
        }
        self.busy = false;
    }

    /// Send one user message: optimistic append, POST, reconcile.
    pub async fn send_message<B: ChatBackend>(&mut self, backend: &B, text: &str) {
        if let Some(request) = self.prepare_send(text) {
            let outcome = backend.send_message(&request).await;
            self.apply_send(outcome);
        }
    }

    /// Replace the session wholesale: fresh id, fresh transcript, active
    /// again. Allowed at any point, including after a successful end.
    pub fn reset_session(&mut self) {
        let id = self.ids.new_session_id();
        self.store.store(&id);
        info!("session reset, new session {}", id);
        self.session_id = Some(id);
        self.transcript.reset();
        self.active = true;
        self.busy = false;
    }

    /// Stage an end-session call carrying the full transcript.
    ///
    /// Returns `None` once the session has already ended; an in-flight
    /// send does not block this.
    pub fn prepare_end(&mut self) -> Option<EndSessionRequest> {
        if !self.active {
            return None;
        }
        self.ensure_session();
        let session_id = self.session_id.clone()?;
        Some(EndSessionRequest {
            session_id,
            full_conversation: self.transcript.messages().to_vec(),
        })
    }

    /// Land the outcome of an end-session call.
    ///
    /// Returns true when the session transitioned to ended. A failure
    /// leaves the session active and is only logged; the caller may try
    /// again.
    pub fn apply_end(&mut self, outcome: Result<(), BackendError>) -> bool {
        match outcome {
            Ok(()) => {
                self.active = false;
                info!("session ended");
                true
            }
            Err(err) => {
                warn!("end-session failed, session stays active: {}", err);
                false
            }
        }
    }

    /// Upload the transcript and close the session.
    ///
    /// Returns true on the ACTIVE → ENDED transition so the UI can
    /// notify the user synchronously.
    pub async fn end_session<B: ChatBackend>(&mut self, backend: &B) -> bool {
        match self.prepare_end() {
            Some(request) => {
                let outcome = backend.end_session(&request).await;
                self.apply_end(outcome)
            }
            None => false,
        }
    }

    /// The resolved session id, if [`ChatSession::ensure_session`] has run.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// The conversation transcript.
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// True while a send is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// False only after a successful end-session, until the next reset.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}
