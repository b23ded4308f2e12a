use std::fmt;

use chrono::Utc;

use jot_store::DocumentStore;

use crate::key::{generate_token, ApiKey, KeySet};

/// Error type for authentication and key management.
///
/// The credential variants are caller errors (401 and 403 at the HTTP
/// layer); the persistence variants are server faults (500).
#[derive(Debug)]
pub enum AuthError<E: fmt::Debug + fmt::Display> {
    /// No credential was presented.
    MissingCredential,
    /// The presented (or named, for revocation) key is not in the set.
    InvalidCredential,
    /// Serializing the key set failed; the write is unconfirmed.
    Serialize(String),
    /// The backend could not read or write the key set document.
    Store(E),
}

impl<E: fmt::Debug + fmt::Display> fmt::Display for AuthError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "API key required"),
            Self::InvalidCredential => write!(f, "invalid API key"),
            Self::Serialize(msg) => write!(f, "serialization error: {msg}"),
            Self::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for AuthError<E> {}

/// Stateless-per-request gate over a persisted allow-list of API keys.
///
/// Holds no key material in memory between calls: every operation loads the
/// current set from the backend first. Issuance and revocation rewrite the
/// whole document synchronously, same as the record stores.
pub struct KeyAuthenticator<S: DocumentStore> {
    doc: S,
}

impl<S: DocumentStore> KeyAuthenticator<S> {
    /// An authenticator over the given key-set document.
    ///
    /// No I/O happens here; an absent document is an empty set.
    pub fn new(doc: S) -> Self {
        Self { doc }
    }

    /// Generate, record, and return a new key.
    ///
    /// The token comes from the OS CSPRNG with 192 bits of entropy. A
    /// collision with an existing key is not reachable in practice, but the
    /// generator retries on one anyway rather than storing a duplicate.
    pub fn issue(&mut self) -> Result<ApiKey, AuthError<S::Error>> {
        let mut set = self.load()?;

        let mut token = generate_token();
        while set.keys.iter().any(|k| k.key == token) {
            token = generate_token();
        }

        let key = ApiKey {
            key: token,
            created_at: Utc::now(),
        };
        set.keys.push(key.clone());
        self.persist(&set)?;

        Ok(key)
    }

    /// Check a presented credential against the current key set.
    ///
    /// Re-reads the persisted set on every call, so revocation elsewhere
    /// takes effect on the next request. Returns the matched key's metadata
    /// on success.
    pub fn authenticate(&self, presented: Option<&str>) -> Result<ApiKey, AuthError<S::Error>> {
        let presented = presented.ok_or(AuthError::MissingCredential)?;

        let set = self.load()?;
        set.keys
            .into_iter()
            .find(|k| k.key == presented)
            .ok_or(AuthError::InvalidCredential)
    }

    /// Remove a key from the set. Fails with
    /// [`AuthError::InvalidCredential`] if the key is not present.
    pub fn revoke(&mut self, key: &str) -> Result<(), AuthError<S::Error>> {
        let mut set = self.load()?;

        let index = set
            .keys
            .iter()
            .position(|k| k.key == key)
            .ok_or(AuthError::InvalidCredential)?;
        set.keys.remove(index);

        self.persist(&set)
    }

    /// All currently valid keys, oldest first.
    pub fn list(&self) -> Result<Vec<ApiKey>, AuthError<S::Error>> {
        Ok(self.load()?.keys)
    }

    /// Get a reference to the underlying document backend.
    pub fn document(&self) -> &S {
        &self.doc
    }

    fn load(&self) -> Result<KeySet, AuthError<S::Error>> {
        match self.doc.read().map_err(AuthError::Store)? {
            None => Ok(KeySet::default()),
            Some(bytes) => Ok(serde_json::from_slice(&bytes).unwrap_or_default()),
        }
    }

    fn persist(&mut self, set: &KeySet) -> Result<(), AuthError<S::Error>> {
        let bytes =
            serde_json::to_vec_pretty(set).map_err(|e| AuthError::Serialize(e.to_string()))?;
        self.doc.write(&bytes).map_err(AuthError::Store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jot_store::MemoryDocument;

    #[test]
    fn missing_credential_is_rejected() {
        let auth = KeyAuthenticator::new(MemoryDocument::new());
        let err = auth.authenticate(None).unwrap_err();
        assert!(matches!(err, AuthError::MissingCredential));
    }

    #[test]
    fn unknown_credential_is_rejected() {
        let auth = KeyAuthenticator::new(MemoryDocument::new());
        let err = auth.authenticate(Some("no-such-key")).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential));
    }

    #[test]
    fn issued_key_authenticates() {
        let mut auth = KeyAuthenticator::new(MemoryDocument::new());
        let issued = auth.issue().unwrap();

        let matched = auth.authenticate(Some(&issued.key)).unwrap();
        assert_eq!(matched, issued);
    }

    #[test]
    fn wrong_key_rejected_even_when_others_exist() {
        let mut auth = KeyAuthenticator::new(MemoryDocument::new());
        auth.issue().unwrap();

        let err = auth.authenticate(Some("wrong-key")).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential));
    }

    #[test]
    fn issue_appends_to_persisted_set() {
        let mut auth = KeyAuthenticator::new(MemoryDocument::new());
        let first = auth.issue().unwrap();
        let second = auth.issue().unwrap();
        assert_ne!(first.key, second.key);

        let keys = auth.list().unwrap();
        assert_eq!(keys, vec![first, second]);
    }

    #[test]
    fn revoked_key_stops_authenticating_immediately() {
        let mut auth = KeyAuthenticator::new(MemoryDocument::new());
        let issued = auth.issue().unwrap();

        auth.revoke(&issued.key).unwrap();
        let err = auth.authenticate(Some(&issued.key)).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential));
    }

    #[test]
    fn revoking_unknown_key_fails() {
        let mut auth = KeyAuthenticator::new(MemoryDocument::new());
        let err = auth.revoke("never-issued").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential));
    }

    #[test]
    fn revocation_elsewhere_is_seen_on_next_call() {
        // Two authenticators over the same document: issuance through one,
        // revocation through the other.
        let mut issuer = KeyAuthenticator::new(MemoryDocument::new());
        let issued = issuer.issue().unwrap();

        let mut admin = KeyAuthenticator::new(issuer.document().clone());
        admin.revoke(&issued.key).unwrap();

        // `issuer` still holds the pre-revocation backend state, but a
        // checker over the post-revocation document rejects right away.
        let checker = KeyAuthenticator::new(admin.document().clone());
        let err = checker.authenticate(Some(&issued.key)).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential));
    }

    #[test]
    fn document_shape_matches_contract() {
        let mut auth = KeyAuthenticator::new(MemoryDocument::new());
        let issued = auth.issue().unwrap();

        let bytes = auth.document().bytes().unwrap().to_vec();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["keys"][0]["key"], issued.key.as_str());
        assert!(json["keys"][0]["createdAt"].is_string());
    }

    #[test]
    fn corrupt_key_set_fails_closed() {
        let doc = MemoryDocument::from_bytes(b"{\"keys\": \"oops\"}".to_vec());
        let auth = KeyAuthenticator::new(doc);

        assert!(auth.list().unwrap().is_empty());
        let err = auth.authenticate(Some("anything")).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential));
    }
}
