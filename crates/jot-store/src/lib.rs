//! # jot-store
//!
//! Flat-file persistence for [`jot-kit`](https://docs.rs/jot-kit).
//!
//! Every store owns exactly one persisted JSON document. The in-memory copy
//! is authoritative between writes; each mutation rewrites the whole
//! document synchronously before the operation reports success, so a
//! confirmed write is on disk and a reopened store sees exactly the last
//! confirmed state.
//!
//! ## Quick Start
//!
//! ```
//! use jot_store::{DocumentStore, MemoryDocument};
//!
//! let mut doc = MemoryDocument::new();
//! doc.write(b"[]").unwrap();
//! assert_eq!(doc.read().unwrap().as_deref(), Some(b"[]".as_slice()));
//! ```
//!
//! ## Backends
//!
//! | Backend | Use case |
//! |---------|----------|
//! | [`MemoryDocument`] | Testing, prototyping |
//! | [`JsonFileDocument`] | One JSON file per store on disk |
//!
//! ## Stores
//!
//! - [`RecordStore`] — ordered records with auto-incrementing ids and
//!   create/update/delete over a [`jot_kit::RecordFields`] type.
//! - [`CounterStore`] — a persisted [`jot_kit::Counter`].

mod counter_store;
mod json_file;
mod memory;
mod store;
mod traits;

pub use counter_store::CounterStore;
pub use json_file::{FileConfig, FileError, JsonFileDocument};
pub use memory::{MemoryDocument, MemoryError};
pub use store::{RecordStore, StoreError};
pub use traits::DocumentStore;
