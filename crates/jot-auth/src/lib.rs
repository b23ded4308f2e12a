//! # jot-auth
//!
//! API-key issuance and authentication over a persisted key set.
//!
//! A [`KeyAuthenticator`] owns one document (shape:
//! `{"keys": [{"key": "...", "createdAt": "..."}]}`) and gates requests
//! against it. The set is re-read from the backend on **every**
//! authentication, so a key revoked elsewhere stops working on the very
//! next request — a deliberate consistency-over-caching tradeoff for a
//! store this small.
//!
//! The per-request outcome is the `Result`: `Ok(ApiKey)` means the request
//! proceeds with the matched key's identity attached; `Err` means it
//! short-circuits with the failure reason. The surrounding HTTP layer maps
//! [`AuthError::MissingCredential`] to 401 and
//! [`AuthError::InvalidCredential`] to 403; how the credential is carried
//! (an `x-api-key` header, typically) is its business, not this crate's.
//!
//! ## Quick Start
//!
//! ```
//! use jot_auth::{AuthError, KeyAuthenticator};
//! use jot_store::MemoryDocument;
//!
//! let mut auth = KeyAuthenticator::new(MemoryDocument::new());
//!
//! let issued = auth.issue().unwrap();
//! assert!(auth.authenticate(Some(&issued.key)).is_ok());
//!
//! let err = auth.authenticate(Some("wrong-key")).unwrap_err();
//! assert!(matches!(err, AuthError::InvalidCredential));
//! ```

#![warn(missing_docs)]

mod authenticator;
mod key;

pub use authenticator::{AuthError, KeyAuthenticator};
pub use key::ApiKey;
