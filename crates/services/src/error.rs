//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use vocab_core::model::EntryError;

/// Field of an entry that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Word,
    Meaning,
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryField::Word => f.write_str("word"),
            EntryField::Meaning => f.write_str("meaning"),
        }
    }
}

/// Errors emitted by `VocabularyStore::add`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VocabularyError {
    #[error("{0} must not be empty")]
    EmptyField(EntryField),
    #[error("'{word}' is already in the vocabulary")]
    DuplicateWord { word: String },
}

impl From<EntryError> for VocabularyError {
    fn from(err: EntryError) -> Self {
        match err {
            EntryError::Meaning(_) => Self::EmptyField(EntryField::Meaning),
            _ => Self::EmptyField(EntryField::Word),
        }
    }
}

/// Errors emitted by quiz sessions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available")]
    NoQuestions,
    #[error("quiz is not running")]
    NotRunning,
}
