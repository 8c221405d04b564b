use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vocab_core::model::{EntryError, VocabularyEntry};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed vocabulary data: {0}")]
    Malformed(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("connection error: {0}")]
    Connection(String),
}

/// Persisted shape for an entry.
///
/// Field order is the on-disk key order (`word`, then `meaning`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub word: String,
    pub meaning: String,
}

impl EntryRecord {
    #[must_use]
    pub fn from_entry(entry: &VocabularyEntry) -> Self {
        Self {
            word: entry.word().to_owned(),
            meaning: entry.meaning().to_owned(),
        }
    }

    /// Convert the record back into a domain `VocabularyEntry`.
    ///
    /// # Errors
    ///
    /// Returns `EntryError` if either field is blank after trimming.
    pub fn into_entry(self) -> Result<VocabularyEntry, EntryError> {
        VocabularyEntry::new(self.word, self.meaning)
    }
}

/// Repository contract for the vocabulary list.
///
/// Reads and writes are whole-list operations: a load returns every entry, a save
/// replaces everything previously stored.
pub trait VocabularyRepository: Send + Sync {
    /// Load every stored entry in persisted order.
    ///
    /// A missing backing store is not an error and yields an empty list. Records
    /// that fail validation are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if the data cannot be read, or
    /// `StorageError::Malformed` if it is not a list of records.
    fn load_entries(&self) -> Result<Vec<VocabularyEntry>, StorageError>;

    /// Replace the stored list with `entries`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entries cannot be written.
    fn save_entries(&self, entries: &[VocabularyEntry]) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<Vec<VocabularyEntry>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: Vec<VocabularyEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }
}

impl VocabularyRepository for InMemoryRepository {
    fn load_entries(&self) -> Result<Vec<VocabularyEntry>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save_entries(&self, entries: &[VocabularyEntry]) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = entries.to_vec();
        Ok(())
    }
}

/// Holds the active repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub entries: Arc<dyn VocabularyRepository>,
}
