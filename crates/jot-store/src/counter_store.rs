use chrono::{DateTime, Utc};

use jot_kit::Counter;

use crate::store::StoreError;
use crate::traits::DocumentStore;

/// A persisted [`Counter`].
///
/// The document is `{"count": 7, "updatedAt": "..."}`. Every mutation
/// stamps the timestamp and rewrites the document before returning the new
/// value. A corrupt document loads as a zeroed counter — it never fails the
/// open.
///
/// # Example
///
/// ```
/// use jot_store::{CounterStore, MemoryDocument};
///
/// let mut hits = CounterStore::open(MemoryDocument::new()).unwrap();
/// assert_eq!(hits.increment().unwrap(), 1);
/// assert_eq!(hits.increment().unwrap(), 2);
/// hits.reset().unwrap();
/// assert_eq!(hits.value(), 0);
/// ```
pub struct CounterStore<S: DocumentStore> {
    counter: Counter,
    doc: S,
}

impl<S: DocumentStore> CounterStore<S> {
    /// Open a counter over the given document backend.
    ///
    /// An absent document starts at zero; so does one that does not parse.
    /// A document with a valid `count` but malformed `updatedAt` (or the
    /// other way round) keeps the valid field and defaults the rest.
    pub fn open(doc: S) -> Result<Self, StoreError<S::Error>> {
        let counter = match doc.read().map_err(StoreError::Store)? {
            None => Counter::new(),
            Some(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
        };

        Ok(Self { counter, doc })
    }

    /// Current count. No side effects.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.counter.value()
    }

    /// When the counter last changed, if it ever has.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.counter.updated_at()
    }

    /// Increase the count by 1, persist, and return the new value.
    pub fn increment(&mut self) -> Result<i64, StoreError<S::Error>> {
        let value = self.counter.increment();
        self.persist()?;
        Ok(value)
    }

    /// Decrease the count by 1, persist, and return the new value.
    pub fn decrement(&mut self) -> Result<i64, StoreError<S::Error>> {
        let value = self.counter.decrement();
        self.persist()?;
        Ok(value)
    }

    /// Set the count back to 0 and persist.
    pub fn reset(&mut self) -> Result<(), StoreError<S::Error>> {
        self.counter.reset();
        self.persist()
    }

    /// Get a reference to the underlying document backend.
    pub fn document(&self) -> &S {
        &self.doc
    }

    fn persist(&mut self) -> Result<(), StoreError<S::Error>> {
        let bytes = serde_json::to_vec_pretty(&self.counter)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.doc.write(&bytes).map_err(StoreError::Store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;

    #[test]
    fn starts_at_zero() {
        let counter = CounterStore::open(MemoryDocument::new()).unwrap();
        assert_eq!(counter.value(), 0);
        assert!(counter.updated_at().is_none());
    }

    #[test]
    fn increment_persists_each_step() {
        let mut counter = CounterStore::open(MemoryDocument::new()).unwrap();
        counter.increment().unwrap();
        counter.increment().unwrap();

        let reopened = CounterStore::open(counter.document().clone()).unwrap();
        assert_eq!(reopened.value(), 2);
        assert!(reopened.updated_at().is_some());
    }

    #[test]
    fn decrement_and_reset() {
        let mut counter = CounterStore::open(MemoryDocument::new()).unwrap();
        assert_eq!(counter.decrement().unwrap(), -1);
        counter.reset().unwrap();

        let reopened = CounterStore::open(counter.document().clone()).unwrap();
        assert_eq!(reopened.value(), 0);
    }

    #[test]
    fn corrupt_document_opens_at_zero() {
        let doc = MemoryDocument::from_bytes(b"][ nonsense".to_vec());
        let counter = CounterStore::open(doc).unwrap();
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn malformed_count_field_degrades_to_zero() {
        let doc = MemoryDocument::from_bytes(br#"{"count": "many"}"#.to_vec());
        let counter = CounterStore::open(doc).unwrap();
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn document_shape_matches_contract() {
        let mut counter = CounterStore::open(MemoryDocument::new()).unwrap();
        counter.increment().unwrap();

        let bytes = counter.document().bytes().unwrap().to_vec();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["count"], 1);
        assert!(json["updatedAt"].is_string());
    }
}
