//! JSON flat-file document backend.
//!
//! One file per store. Writes go to a sibling temp file which is then
//! renamed over the target, so a crash mid-write leaves the previous
//! document intact rather than a truncated one.
//!
//! # Example
//!
//! ```no_run
//! use jot_store::{DocumentStore, JsonFileDocument};
//!
//! let mut doc = JsonFileDocument::new("todos.json");
//! doc.write(b"[]").unwrap();
//!
//! let bytes = doc.read().unwrap().unwrap();
//! assert_eq!(bytes, b"[]");
//! ```

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::traits::DocumentStore;

/// File backend configuration options.
#[derive(Debug, Clone)]
pub struct FileConfig {
    /// Call `fsync` after writing the temp file, before the rename.
    /// Defaults to true — a confirmed write survives power loss.
    pub fsync: bool,
    /// Create missing parent directories on the first write.
    /// Defaults to false.
    pub create_parents: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            fsync: true,
            create_parents: false,
        }
    }
}

/// Error type for the file backend.
#[derive(Debug)]
pub enum FileError {
    /// Reading the document failed for a reason other than it not existing.
    Read(io::Error),
    /// Writing, syncing, or renaming the document failed.
    Write(io::Error),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "failed to read document: {e}"),
            Self::Write(e) => write!(f, "failed to write document: {e}"),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) | Self::Write(e) => Some(e),
        }
    }
}

/// JSON flat-file persistence backend.
///
/// Construction does no I/O — a path whose file does not exist yet is a
/// store that starts empty. The file appears on the first write.
#[derive(Debug, Clone)]
pub struct JsonFileDocument {
    path: PathBuf,
    config: FileConfig,
}

impl JsonFileDocument {
    /// A document at the given path with default config.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_config(path, FileConfig::default())
    }

    /// A document at the given path with custom configuration.
    pub fn with_config<P: AsRef<Path>>(path: P, config: FileConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }

    /// The path this document persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl DocumentStore for JsonFileDocument {
    type Error = FileError;

    fn read(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FileError::Read(e)),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.config.create_parents {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).map_err(FileError::Write)?;
            }
        }

        let temp = self.temp_path();
        let mut file = File::create(&temp).map_err(FileError::Write)?;
        file.write_all(bytes).map_err(FileError::Write)?;
        if self.config.fsync {
            file.sync_all().map_err(FileError::Write)?;
        }
        drop(file);

        fs::rename(&temp, &self.path).map_err(FileError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let doc = JsonFileDocument::new(dir.path().join("absent.json"));
        assert!(doc.read().unwrap().is_none());
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = JsonFileDocument::new(dir.path().join("doc.json"));

        doc.write(b"{\"count\": 3}").unwrap();
        assert_eq!(doc.read().unwrap(), Some(b"{\"count\": 3}".to_vec()));
    }

    #[test]
    fn write_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let mut doc = JsonFileDocument::new(&path);

        doc.write(b"[]").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("doc.json")]);
    }

    #[test]
    fn second_write_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = JsonFileDocument::new(dir.path().join("doc.json"));

        doc.write(b"first").unwrap();
        doc.write(b"second").unwrap();
        assert_eq!(doc.read().unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn create_parents_makes_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("doc.json");
        let mut doc = JsonFileDocument::with_config(
            &path,
            FileConfig {
                create_parents: true,
                ..FileConfig::default()
            },
        );

        doc.write(b"[]").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_without_parents_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("doc.json");
        let mut doc = JsonFileDocument::new(&path);

        let err = doc.write(b"[]").unwrap_err();
        assert!(matches!(err, FileError::Write(_)));
    }
}
