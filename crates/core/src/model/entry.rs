use thiserror::Error;

use crate::model::text::{MeaningText, TextError, WordText};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("invalid word: {0}")]
    Word(#[source] TextError),

    #[error("invalid meaning: {0}")]
    Meaning(#[source] TextError),
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// Lowercased identity key used for duplicate detection and per-word statistics.
#[must_use]
pub fn word_key(word: &str) -> String {
    word.trim().to_lowercase()
}

/// A stored word/meaning pair.
///
/// Both fields are trimmed and non-blank. The word keeps the casing it was entered
/// with; identity comparisons go through [`word_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    word: WordText,
    meaning: MeaningText,
}

impl VocabularyEntry {
    /// Validate raw word/meaning text into an entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::Word` or `EntryError::Meaning` when a field is blank.
    pub fn new(word: impl AsRef<str>, meaning: impl AsRef<str>) -> Result<Self, EntryError> {
        let word = WordText::parse(word).map_err(EntryError::Word)?;
        let meaning = MeaningText::parse(meaning).map_err(EntryError::Meaning)?;
        Ok(Self { word, meaning })
    }

    #[must_use]
    pub fn word(&self) -> &str {
        self.word.as_str()
    }

    #[must_use]
    pub fn meaning(&self) -> &str {
        self.meaning.as_str()
    }

    #[must_use]
    pub fn key(&self) -> String {
        word_key(self.word.as_str())
    }

    /// True when `word` names this entry, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn has_word(&self, word: &str) -> bool {
        self.key() == word_key(word)
    }

    /// Exact answer check: trimmed, case-insensitive equality with the meaning.
    #[must_use]
    pub fn accepts_answer(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.meaning.as_str().to_lowercase()
    }
}
