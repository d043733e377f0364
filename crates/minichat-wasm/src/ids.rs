//! Browser-side session identifier generation.

use minichat_session::{v4_from_bytes, IdSource};
use minichat_types::SessionId;

/// [`IdSource`] backed by the browser crypto API.
///
/// Falls back to `Math.random` in non-secure contexts, shaping the
/// result like a v4 UUID either way.
#[derive(Debug, Default)]
pub struct BrowserIds;

impl IdSource for BrowserIds {
    fn new_session_id(&self) -> SessionId {
        let mut bytes = [0u8; 16];

        let filled = web_sys::window()
            .and_then(|w| w.crypto().ok())
            .map(|crypto| crypto.get_random_values_with_u8_array(&mut bytes).is_ok())
            .unwrap_or(false);

        if !filled {
            log::warn!("Secure randomness unavailable, using Math.random fallback");
            for byte in bytes.iter_mut() {
                *byte = (js_sys::Math::random() * 256.0) as u8;
            }
        }

        v4_from_bytes(bytes)
    }
}
