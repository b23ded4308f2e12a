//! # jot-kit
//!
//! Record model for small flat-file applications: uniquely identified
//! records with validated fields, and running counters.
//!
//! A [`Record`] pairs a store-assigned integer id with an application-defined
//! field struct. Field types implement [`RecordFields`], which splits caller
//! input into a *draft* (creation, required fields checked) and a *patch*
//! (partial update, only present fields applied). Validation always happens
//! before anything is written, so a rejected draft or patch leaves no trace.
//!
//! Persistence lives in [`jot-store`](https://docs.rs/jot-store); this crate
//! is pure data model and does no I/O.
//!
//! ## Quick Start
//!
//! ```
//! use jot_kit::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Todo {
//!     text: String,
//! }
//!
//! struct TodoDraft {
//!     text: Option<String>,
//! }
//!
//! impl RecordFields for Todo {
//!     type Draft = TodoDraft;
//!     type Patch = TodoDraft;
//!
//!     fn from_draft(draft: TodoDraft) -> Result<Self, ValidationError> {
//!         match draft.text {
//!             Some(text) if !text.is_empty() => Ok(Todo { text }),
//!             Some(_) => Err(ValidationError::invalid("text", "must not be empty")),
//!             None => Err(ValidationError::missing("text")),
//!         }
//!     }
//!
//!     fn apply_patch(&mut self, patch: TodoDraft) -> Result<(), ValidationError> {
//!         if let Some(text) = patch.text {
//!             if text.is_empty() {
//!                 return Err(ValidationError::invalid("text", "must not be empty"));
//!             }
//!             self.text = text;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let todo = Todo::from_draft(TodoDraft { text: Some("buy milk".into()) }).unwrap();
//! assert_eq!(todo.text, "buy milk");
//!
//! let err = Todo::from_draft(TodoDraft { text: None }).unwrap_err();
//! assert_eq!(err.field(), "text");
//! ```

#![warn(missing_docs)]

mod counter;
mod error;
mod record;

pub mod prelude;

pub use counter::Counter;
pub use error::ValidationError;
pub use record::{Record, RecordFields};
