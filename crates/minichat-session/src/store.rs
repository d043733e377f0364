//! Session identifier persistence port.

use std::cell::RefCell;
use std::rc::Rc;

use minichat_types::SessionId;

/// Persistence port for the session identifier.
///
/// One key-value pair: the session id. Adapters swallow and log storage
/// failures rather than surfacing them; the widget keeps working with the
/// in-memory id for the lifetime of the page.
pub trait SessionStore {
    /// Load the persisted session id, if any.
    fn load(&self) -> Option<SessionId>;

    /// Persist the session id, replacing any previous value.
    fn store(&self, id: &str);

    /// Remove the persisted session id.
    fn clear(&self);
}

/// In-memory store, used under test and wherever no durable storage is
/// available.
///
/// Clones share the same value, so a test can keep a handle to the
/// storage a manager owns.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<RefCell<Option<SessionId>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<SessionId> {
        self.value.borrow().clone()
    }

    fn store(&self, id: &str) {
        *self.value.borrow_mut() = Some(id.to_string());
    }

    fn clear(&self) {
        *self.value.borrow_mut() = None;
    }
}
