use storage::repository::{StorageError, VocabularyRepository};
use vocab_core::model::{VocabularyEntry, word_key};

use crate::error::VocabularyError;

/// Ordered, owned list of vocabulary entries.
///
/// Insertion order is kept for listing. Words are unique ignoring case.
#[derive(Debug, Clone, Default)]
pub struct VocabularyStore {
    entries: Vec<VocabularyEntry>,
    dirty: bool,
}

impl VocabularyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already validated entries. Later duplicates of a word are
    /// dropped so the first occurrence wins.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = VocabularyEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            if store.find(entry.word()).is_some() {
                tracing::warn!(word = entry.word(), "dropping duplicate vocabulary entry");
                continue;
            }
            store.entries.push(entry);
        }
        store
    }

    /// Load persisted entries.
    ///
    /// Never fails: unreadable or malformed data is logged and the store starts empty.
    #[must_use]
    pub fn load(repo: &dyn VocabularyRepository) -> Self {
        match repo.load_entries() {
            Ok(entries) => Self::from_entries(entries),
            Err(err) => {
                tracing::warn!(%err, "could not load vocabulary, starting empty");
                Self::new()
            }
        }
    }

    /// Write the full list, replacing whatever was persisted before.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails. The in-memory list is untouched
    /// and stays marked as unsaved.
    pub fn save(&mut self, repo: &dyn VocabularyRepository) -> Result<(), StorageError> {
        repo.save_entries(&self.entries)?;
        self.dirty = false;
        Ok(())
    }

    /// Validate and append a single entry.
    ///
    /// # Errors
    ///
    /// Returns `VocabularyError::EmptyField` if either field is blank after trimming,
    /// or `VocabularyError::DuplicateWord` if the word exists in any casing.
    pub fn add(
        &mut self,
        word: &str,
        meaning: &str,
    ) -> Result<&VocabularyEntry, VocabularyError> {
        let entry = VocabularyEntry::new(word, meaning)?;
        if let Some(existing) = self.find(entry.word()) {
            return Err(VocabularyError::DuplicateWord {
                word: existing.word().to_owned(),
            });
        }

        self.entries.push(entry);
        self.dirty = true;
        let idx = self.entries.len() - 1;
        Ok(&self.entries[idx])
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn list(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// Case-insensitive lookup by word.
    #[must_use]
    pub fn find(&self, word: &str) -> Option<&VocabularyEntry> {
        let key = word_key(word);
        self.entries.iter().find(|e| e.key() == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when entries were added since the last successful load or save.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
