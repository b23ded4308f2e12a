use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Bytes of entropy per generated key. 24 bytes = 192 bits, hex-encoded to
/// a 48-character token.
const KEY_BYTES: usize = 24;

/// An issued bearer credential.
///
/// The token itself is opaque — it carries no structure and is compared
/// byte-for-byte. Keys are never mutated after issuance; they leave the set
/// only through explicit revocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    /// The opaque token presented by callers.
    pub key: String,
    /// When the key was issued.
    pub created_at: DateTime<Utc>,
}

/// The persisted key set: `{"keys": [...]}`.
///
/// Lenient on load like every other document — a malformed set degrades to
/// empty, which fails closed (nothing authenticates) rather than open.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct KeySet {
    #[serde(default)]
    pub keys: Vec<ApiKey>,
}

/// Generate a fresh random token from the operating system's CSPRNG.
pub(crate) fn generate_token() -> String {
    let mut buf = [0u8; KEY_BYTES];
    OsRng.fill_bytes(&mut buf);
    buf.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_48_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), KEY_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_do_not_repeat() {
        // Statistically: 192 bits of entropy.
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn api_key_serializes_camel_case() {
        let key = ApiKey {
            key: "abc123".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["key"], "abc123");
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn malformed_key_set_degrades_to_empty() {
        let set: KeySet = serde_json::from_str("{}").unwrap();
        assert!(set.keys.is_empty());
    }
}
