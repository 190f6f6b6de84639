//! One-way hashing for PII fingerprints, content integrity, and certificates.
//!
//! Every digest is a lowercase blake3 hex string.

use unicode_normalization::UnicodeNormalization;

/// Separator between hashed fields; cannot occur in any hashed value we
/// produce (timestamps, hex digests, event codes, file paths).
const FIELD_SEPARATOR: char = '\u{1f}';

/// Normalize PII text before hashing: NFC, then trim surrounding whitespace.
/// Case is preserved.
pub fn normalize_pii(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed.trim().to_string()
}

/// Fingerprint of a matched PII value. Equal for inputs that differ only in
/// Unicode composition or surrounding whitespace.
pub fn pii_fingerprint(text: &str) -> String {
    hex_digest(normalize_pii(text).as_bytes())
}

/// Hash of exact content bytes (no normalization).
pub fn content_hash(content: &str) -> String {
    hex_digest(content.as_bytes())
}

/// Hash of several fields joined with an unambiguous separator.
pub fn hash_fields(fields: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    let mut sep = [0u8; 4];
    let sep = FIELD_SEPARATOR.encode_utf8(&mut sep).as_bytes();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            hasher.update(sep);
        }
        hasher.update(field.as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

fn hex_digest(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}
