//! Durable record collections with auto-incrementing identifiers.
//!
//! [`RecordStore`] keeps an ordered `Vec` of records in memory and mirrors
//! it to a single persisted JSON document. Every mutation completes in
//! memory and then rewrites the whole document synchronously before the
//! operation returns — there is no batching and no write-ahead log.
//!
//! # Example
//!
//! ```
//! use jot_kit::{RecordFields, ValidationError};
//! use jot_store::{MemoryDocument, RecordStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Todo { text: String }
//!
//! #[derive(Default)]
//! struct TodoDraft { text: Option<String> }
//!
//! impl RecordFields for Todo {
//!     type Draft = TodoDraft;
//!     type Patch = TodoDraft;
//!
//!     fn from_draft(draft: TodoDraft) -> Result<Self, ValidationError> {
//!         let text = draft.text.ok_or_else(|| ValidationError::missing("text"))?;
//!         Ok(Todo { text })
//!     }
//!
//!     fn apply_patch(&mut self, patch: TodoDraft) -> Result<(), ValidationError> {
//!         if let Some(text) = patch.text {
//!             self.text = text;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut todos = RecordStore::<Todo, _>::open(MemoryDocument::new()).unwrap();
//! let created = todos.create(TodoDraft { text: Some("buy milk".into()) }).unwrap();
//! assert_eq!(created.id, 1);
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use jot_kit::{Record, RecordFields, ValidationError};

use crate::traits::DocumentStore;

/// Error type for store operations.
///
/// The first two variants are caller errors (the HTTP layer maps them to
/// 400 and 404); the last two are persistence faults (500). On a
/// persistence fault the in-memory mutation has already happened — the
/// store may be ahead of disk, and the caller must treat the write as
/// unconfirmed rather than assume it was rolled back.
#[derive(Debug)]
pub enum StoreError<E: fmt::Debug + fmt::Display> {
    /// Caller-supplied data was rejected; nothing was changed.
    Validation(ValidationError),
    /// No record has the given id.
    NotFound(u64),
    /// Serializing the collection failed; the write is unconfirmed.
    Serialize(String),
    /// The backend could not read or write the document; on a write, the
    /// in-memory change was kept but is not confirmed durable.
    Store(E),
}

impl<E: fmt::Debug + fmt::Display> fmt::Display for StoreError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation error: {e}"),
            Self::NotFound(id) => write!(f, "no record with id {id}"),
            Self::Serialize(msg) => write!(f, "serialization error: {msg}"),
            Self::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for StoreError<E> {}

impl<E: fmt::Debug + fmt::Display> From<ValidationError> for StoreError<E> {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

/// Durable, in-memory-first collection of records with unique,
/// monotonically assigned integer ids.
///
/// Ids start at 1, grow strictly, and are never reused — deleting the
/// newest record does not hand its id to the next create. On open, the id
/// counter recovers as `max(existing ids) + 1`.
///
/// Mutating methods take `&mut self`, so the borrow checker serializes
/// create/update/delete against each other and against reads: the
/// mutate-then-persist step is one uninterruptible logical unit per caller.
pub struct RecordStore<T: RecordFields, S: DocumentStore> {
    records: Vec<Record<T>>,
    next_id: u64,
    doc: S,
}

impl<T, S> RecordStore<T, S>
where
    T: RecordFields + Clone + Serialize + DeserializeOwned,
    S: DocumentStore,
{
    /// Open a store over the given document backend.
    ///
    /// A document that has never been written yields an empty store. A
    /// document that exists but is corrupt degrades instead of failing:
    /// entries that do not parse as records are dropped, as are entries
    /// whose id is zero or repeats an earlier one. Only a backend that
    /// cannot read at all (I/O failure, not absence) is an error.
    pub fn open(doc: S) -> Result<Self, StoreError<S::Error>> {
        let records = match doc.read().map_err(StoreError::Store)? {
            None => Vec::new(),
            Some(bytes) => salvage_records(&bytes),
        };
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;

        Ok(Self {
            records,
            next_id,
            doc,
        })
    }

    /// All records in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Record<T>] {
        &self.records
    }

    /// Look up a single record by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Record<T>> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next created record will receive.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Validate `draft`, append a new record, persist, and return it.
    ///
    /// Validation runs before any state changes, so a rejected draft leaves
    /// both memory and disk untouched.
    pub fn create(&mut self, draft: T::Draft) -> Result<&Record<T>, StoreError<S::Error>> {
        let fields = T::from_draft(draft)?;

        let record = Record {
            id: self.next_id,
            fields,
        };
        self.next_id += 1;
        self.records.push(record);
        self.persist()?;

        Ok(&self.records[self.records.len() - 1])
    }

    /// Apply the fields present in `patch` to the record with `id`,
    /// persist, and return the updated record.
    ///
    /// The patch is applied to a copy first — a patch that fails validation
    /// leaves the stored record untouched.
    pub fn update(&mut self, id: u64, patch: T::Patch) -> Result<&Record<T>, StoreError<S::Error>> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;

        let mut fields = self.records[index].fields.clone();
        fields.apply_patch(patch)?;
        self.records[index].fields = fields;
        self.persist()?;

        Ok(&self.records[index])
    }

    /// Remove the record with `id` and persist the remaining collection.
    pub fn delete(&mut self, id: u64) -> Result<(), StoreError<S::Error>> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;

        self.records.remove(index);
        self.persist()
    }

    /// Get a reference to the underlying document backend.
    pub fn document(&self) -> &S {
        &self.doc
    }

    /// Get a mutable reference to the underlying document backend.
    pub fn document_mut(&mut self) -> &mut S {
        &mut self.doc
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn persist(&mut self) -> Result<(), StoreError<S::Error>> {
        let bytes = serde_json::to_vec_pretty(&self.records)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.doc.write(&bytes).map_err(StoreError::Store)
    }
}

/// Recover whatever records a document still yields.
///
/// Not-JSON or not-an-array gives an empty collection. Within an array,
/// each entry parses independently; failures are dropped rather than
/// poisoning the rest. Ids must be positive and first-seen wins.
fn salvage_records<T: DeserializeOwned>(bytes: &[u8]) -> Vec<Record<T>> {
    let items = match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(serde_json::Value::Array(items)) => items,
        _ => return Vec::new(),
    };

    let mut records: Vec<Record<T>> = Vec::with_capacity(items.len());
    for item in items {
        if let Ok(record) = serde_json::from_value::<Record<T>>(item) {
            if record.id != 0 && !records.iter().any(|r| r.id == record.id) {
                records.push(record);
            }
        }
    }
    records
}
