use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("text must not be empty")]
    Empty,
}

/// Non-blank, trimmed text tagged with the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text<T>(String, PhantomData<T>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word;
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Meaning;

pub type WordText = Text<Word>;
pub type MeaningText = Text<Meaning>;

impl<T> Text<T> {
    /// Trim the input and reject it when nothing is left.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the input is blank.
    pub fn parse(s: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned(), PhantomData))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T> fmt::Display for Text<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
