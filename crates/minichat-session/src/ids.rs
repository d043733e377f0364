//! Session identifier generation.

use minichat_types::SessionId;

/// Source of fresh session identifiers.
///
/// The browser widget plugs in a crypto-backed source; native code and
/// tests use [`UuidSource`].
pub trait IdSource {
    fn new_session_id(&self) -> SessionId;
}

/// Default source backed by the `uuid` crate (random v4).
#[derive(Debug, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn new_session_id(&self) -> SessionId {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Format 16 pseudo-random bytes as an RFC-4122-shaped v4 identifier.
///
/// Fallback path for environments without a secure UUID source. The
/// version and variant bits are forced so the result has the usual v4
/// layout even when the input bytes are weak.
#[must_use]
pub fn v4_from_bytes(mut bytes: [u8; 16]) -> SessionId {
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let mut out = String::with_capacity(36);
    for (i, byte) in bytes.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_source_yields_parseable_v4() {
        let id = UuidSource.new_session_id();
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_v4_from_bytes_shape() {
        let id = v4_from_bytes([0u8; 16]);
        assert_eq!(id.len(), 36);
        assert_eq!(id, "00000000-0000-4000-8000-000000000000");

        let id = v4_from_bytes([0xff; 16]);
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        // variant bits forced to the RFC-4122 range
        assert!(matches!(id.as_bytes()[19], b'8' | b'9' | b'a' | b'b'));
    }

    #[test]
    fn test_v4_from_bytes_distinct_inputs_distinct_ids() {
        let a = v4_from_bytes([1u8; 16]);
        let b = v4_from_bytes([2u8; 16]);
        assert_ne!(a, b);
    }
}
