//! Content fingerprinting for session deduplication

use sha2::{Digest, Sha256};

/// Compute the content fingerprint for a session
///
/// SHA-256 over `owner_id`, a separator, and the source text, hex-encoded.
/// Used as the natural key for session rows: the same user re-uploading the
/// same document maps to the same fingerprint.
pub fn content_fingerprint(owner_id: &str, source_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(owner_id.as_bytes());
    hasher.update(b"-");
    hasher.update(source_text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = content_fingerprint("user-1", "some text");
        let b = content_fingerprint("user-1", "some text");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = content_fingerprint("user-1", "some text");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_varies_by_owner() {
        assert_ne!(
            content_fingerprint("user-1", "same text"),
            content_fingerprint("user-2", "same text")
        );
    }

    #[test]
    fn test_fingerprint_varies_by_text() {
        assert_ne!(
            content_fingerprint("user-1", "text one"),
            content_fingerprint("user-1", "text two")
        );
    }
}
