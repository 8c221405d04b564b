use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use vocab_core::model::VocabularyEntry;

use crate::repository::{Storage, StorageError, VocabularyRepository};

mod mapping;

/// Vocabulary list stored as a single JSON array on disk.
///
/// Each call opens, fully reads or fully writes, and closes the file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VocabularyRepository for JsonFileRepository {
    fn load_entries(&self) -> Result<Vec<VocabularyEntry>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "vocabulary file not found");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let entries = mapping::decode_entries(&raw)?;
        tracing::debug!(path = %self.path.display(), count = entries.len(), "loaded vocabulary");
        Ok(entries)
    }

    fn save_entries(&self, entries: &[VocabularyEntry]) -> Result<(), StorageError> {
        let body = mapping::encode_entries(entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, body).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), count = entries.len(), "saved vocabulary");
        Ok(())
    }
}

impl Storage {
    /// Build a `Storage` backed by a JSON file at `path`.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        let repo: Arc<dyn VocabularyRepository> = Arc::new(JsonFileRepository::new(path));
        Self { entries: repo }
    }
}
