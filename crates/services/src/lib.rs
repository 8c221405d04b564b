#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz;
pub mod vocabulary_service;

pub use vocab_core::Clock;

pub use app_services::VocabularyApp;
pub use error::{EntryField, QuizError, VocabularyError};
pub use quiz::{AnswerSource, Judgement, Question, QuizOutcome, QuizSession, QuizState, ScriptedAnswers};
pub use vocabulary_service::VocabularyStore;
