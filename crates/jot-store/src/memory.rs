use std::fmt;

use crate::traits::DocumentStore;

/// In-memory document backend.
///
/// Holds the document bytes in a field — nothing touches disk. Ideal for
/// testing and prototyping; state is lost when the value is dropped.
///
/// # Example
///
/// ```
/// use jot_store::{DocumentStore, MemoryDocument};
///
/// let mut doc = MemoryDocument::new();
/// assert!(doc.read().unwrap().is_none());
///
/// doc.write(b"{\"count\": 1}").unwrap();
/// assert!(doc.read().unwrap().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    bytes: Option<Vec<u8>>,
}

/// Error type for the in-memory backend.
///
/// This backend never actually fails, but the trait requires an error type.
#[derive(Debug, Clone)]
pub struct MemoryError(String);

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryDocument error: {}", self.0)
    }
}

impl std::error::Error for MemoryError {}

impl MemoryDocument {
    /// Create a backend with no document yet.
    #[must_use]
    pub fn new() -> Self {
        Self { bytes: None }
    }

    /// Create a backend seeded with an existing document, as if `bytes` had
    /// been written previously. Useful for testing load behavior.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }

    /// The current document, if any.
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl DocumentStore for MemoryDocument {
    type Error = MemoryError;

    fn read(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.bytes.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }
}
