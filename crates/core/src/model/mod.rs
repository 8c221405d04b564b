mod entry;
mod score;
mod statistics;
mod text;

pub use entry::{EntryError, VocabularyEntry, word_key};
pub use score::QuizScore;
pub use statistics::{SessionStatistics, StatisticsTracker, WordStats, WordStatsRow};
pub use text::{Meaning, MeaningText, Text, TextError, Word, WordText};
