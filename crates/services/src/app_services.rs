use std::sync::Arc;

use rand::Rng;
use storage::repository::{Storage, StorageError, VocabularyRepository};
use vocab_core::model::{SessionStatistics, StatisticsTracker, VocabularyEntry};

use crate::error::{QuizError, VocabularyError};
use crate::quiz::{AnswerSource, QuizOutcome, QuizSession};
use crate::vocabulary_service::VocabularyStore;
use crate::Clock;

/// Session-wide owner of the vocabulary and its statistics.
///
/// Built once at startup and handed by reference to the CLI; there is no other
/// shared state.
pub struct VocabularyApp {
    clock: Clock,
    repo: Arc<dyn VocabularyRepository>,
    store: VocabularyStore,
    stats: StatisticsTracker,
}

impl VocabularyApp {
    /// Create an app with an empty store. Call [`Self::load_from_disk`] to read
    /// persisted entries.
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn VocabularyRepository>) -> Self {
        Self {
            clock,
            repo,
            store: VocabularyStore::new(),
            stats: StatisticsTracker::new(),
        }
    }

    /// Create an app from `storage` and immediately load its entries.
    #[must_use]
    pub fn open(clock: Clock, storage: &Storage) -> Self {
        let mut app = Self::new(clock, Arc::clone(&storage.entries));
        app.load_from_disk();
        app
    }

    /// Replace the in-memory list with persisted entries. Returns how many were loaded.
    ///
    /// Read failures are logged and leave an empty store.
    pub fn load_from_disk(&mut self) -> usize {
        self.store = VocabularyStore::load(self.repo.as_ref());
        tracing::info!(count = self.store.len(), "vocabulary loaded");
        self.store.len()
    }

    /// Persist the full list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the write fails; the in-memory list is kept.
    pub fn save_to_disk(&mut self) -> Result<(), StorageError> {
        match self.store.save(self.repo.as_ref()) {
            Ok(()) => {
                tracing::info!(count = self.store.len(), "vocabulary saved");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "could not save vocabulary, keeping in-memory copy");
                Err(err)
            }
        }
    }

    /// Add a single word.
    ///
    /// # Errors
    ///
    /// Returns `VocabularyError` for blank fields or duplicate words.
    pub fn add_word(&mut self, word: &str, meaning: &str) -> Result<(), VocabularyError> {
        let entry = self.store.add(word, meaning)?;
        tracing::debug!(word = entry.word(), "word added");
        Ok(())
    }

    #[must_use]
    pub fn list_entries(&self) -> &[VocabularyEntry] {
        self.store.list()
    }

    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.store.is_dirty()
    }

    /// Run a quiz over the current entries.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` without consulting `answers` when the
    /// vocabulary is empty.
    pub fn run_quiz<R, A>(&mut self, rng: &mut R, answers: &mut A) -> Result<QuizOutcome, QuizError>
    where
        R: Rng + ?Sized,
        A: AnswerSource + ?Sized,
    {
        let session = QuizSession::new(self.store.list())?;
        session.run(rng, answers, &mut self.stats, &self.clock)
    }

    #[must_use]
    pub fn statistics(&self) -> SessionStatistics {
        self.stats.snapshot()
    }

    #[must_use]
    pub fn tracker(&self) -> &StatisticsTracker {
        &self.stats
    }
}
