use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A uniquely identified entity held by a store.
///
/// The `id` is assigned by the store: positive, unique within the store,
/// strictly increasing in assignment order, and never reused after a
/// deletion. Application fields are flattened into the same JSON object,
/// so a `Record<Todo>` serializes as `{"id": 1, "text": "buy milk"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    /// Store-assigned identifier.
    pub id: u64,
    /// Application-defined fields.
    #[serde(flatten)]
    pub fields: T,
}

/// Application-defined field set of a record.
///
/// Splits caller input into two shapes:
///
/// - a **draft** for creation, where required fields are `Option` so their
///   absence is representable and rejected with a [`ValidationError`];
/// - a **patch** for updates, where every field is optional and only the
///   present ones are applied.
///
/// Both conversions validate before mutating. Stores additionally apply a
/// patch to a copy of the fields, so a patch that fails part-way through
/// never leaves a half-updated record behind.
///
/// ```
/// use jot_kit::{RecordFields, ValidationError};
///
/// #[derive(Clone)]
/// struct Note { text: String }
///
/// struct NoteDraft { text: Option<String> }
///
/// impl RecordFields for Note {
///     type Draft = NoteDraft;
///     type Patch = NoteDraft;
///
///     fn from_draft(draft: NoteDraft) -> Result<Self, ValidationError> {
///         let text = draft.text.ok_or_else(|| ValidationError::missing("text"))?;
///         Ok(Note { text })
///     }
///
///     fn apply_patch(&mut self, patch: NoteDraft) -> Result<(), ValidationError> {
///         if let Some(text) = patch.text {
///             self.text = text;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait RecordFields: Sized {
    /// Creation input. Required fields are `Option` here and checked in
    /// [`RecordFields::from_draft`].
    type Draft;

    /// Partial-update input. Every field is optional.
    type Patch;

    /// Validate a draft and build the field set. Must not have side effects:
    /// an `Err` means nothing was created.
    fn from_draft(draft: Self::Draft) -> Result<Self, ValidationError>;

    /// Validate and apply the fields present in `patch`.
    ///
    /// Absent fields are left untouched. Implementations should validate a
    /// field before assigning it; the store discards the whole application
    /// on `Err`, so ordering only matters for which error is reported.
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Note {
        text: String,
    }

    #[test]
    fn fields_flatten_into_record_object() {
        let record = Record {
            id: 3,
            fields: Note {
                text: "call bob".into(),
            },
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 3, "text": "call bob" })
        );
    }

    #[test]
    fn record_round_trips() {
        let record = Record {
            id: 1,
            fields: Note {
                text: "buy milk".into(),
            },
        };

        let bytes = serde_json::to_vec(&record).unwrap();
        let back: Record<Note> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, record);
    }
}
