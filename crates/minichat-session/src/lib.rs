//! Session and conversation management for minichat
//!
//! This crate provides the session lifecycle (create, reset, end), the
//! ordered conversation transcript, and the ports the browser widget
//! plugs its storage and HTTP adapters into.
//!
//! # Architecture
//!
//! - [`ChatSession`]: the session and conversation manager
//! - [`SessionStore`]: persistence port for the session identifier
//! - [`ChatBackend`]: transport port for the two chat endpoints
//! - [`IdSource`]: source of fresh session identifiers

pub mod backend;
pub mod ids;
pub mod session;
pub mod store;
pub mod transcript;

mod clock;

pub use backend::{BackendError, ChatBackend};
pub use ids::{v4_from_bytes, IdSource, UuidSource};
pub use session::ChatSession;
pub use store::{MemoryStore, SessionStore};
pub use transcript::Transcript;
