//! Browser local-storage adapter for the session id.

use minichat_session::SessionStore;
use minichat_types::{SessionId, SESSION_ID_KEY};

/// [`SessionStore`] backed by `window.localStorage`.
///
/// Storage failures (quota, privacy mode, missing window) are logged and
/// swallowed; the widget keeps working with the in-memory id for the
/// lifetime of the page.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl SessionStore for LocalStorage {
    fn load(&self) -> Option<SessionId> {
        let storage = self.storage()?;
        storage.get_item(SESSION_ID_KEY).ok().flatten()
    }

    fn store(&self, id: &str) {
        match self.storage() {
            Some(storage) => {
                if storage.set_item(SESSION_ID_KEY, id).is_err() {
                    log::warn!("Failed to persist session id");
                }
            }
            None => log::warn!("Local storage unavailable, session id not persisted"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(SESSION_ID_KEY);
        }
    }
}
