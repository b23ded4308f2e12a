use std::fmt;

/// A single persisted document — the on-disk representation of one store's
/// entire state.
///
/// A store serializes its whole collection and hands the bytes to
/// [`DocumentStore::write`]; on construction it calls
/// [`DocumentStore::read`] once to recover the last confirmed state. The
/// document is opaque bytes to the backend — the store owns the JSON shape.
///
/// `read` takes `&self` so consumers that re-read on every call (the key
/// authenticator does, to pick up revocations immediately) can hold the
/// backend behind a shared reference.
pub trait DocumentStore {
    /// Error type for this backend.
    type Error: fmt::Debug + fmt::Display;

    /// Read the current document. Returns `None` if it has never been
    /// written — a store treats that as "start empty", not as a failure.
    fn read(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Replace the document with `bytes`. When this returns `Ok`, the
    /// document is durable: a subsequent `read` (including after a restart,
    /// for file-backed implementations) returns exactly these bytes.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}
