use std::collections::BTreeMap;

use crate::model::entry::word_key;

/// Floor percentage, zero when nothing was asked.
fn floor_percent(correct: u32, asked: u32) -> u32 {
    if asked == 0 {
        return 0;
    }
    let pct = u64::from(correct) * 100 / u64::from(asked);
    u32::try_from(pct).unwrap_or(u32::MAX)
}

/// Asked/correct counters for a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordStats {
    pub asked: u32,
    pub correct: u32,
}

impl WordStats {
    fn record(&mut self, is_correct: bool) {
        self.asked = self.asked.saturating_add(1);
        if is_correct {
            self.correct = self.correct.saturating_add(1);
        }
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        floor_percent(self.correct, self.asked)
    }
}

/// Running accuracy counters for the current session. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct StatisticsTracker {
    asked: u32,
    correct: u32,
    streak: u32,
    best_streak: u32,
    per_word: BTreeMap<String, WordStats>,
}

impl StatisticsTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one judged answer. This is the only mutator.
    pub fn record_result(&mut self, word: &str, is_correct: bool) {
        self.asked = self.asked.saturating_add(1);
        if is_correct {
            self.correct = self.correct.saturating_add(1);
            self.streak = self.streak.saturating_add(1);
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }

        self.per_word
            .entry(word_key(word))
            .or_default()
            .record(is_correct);
    }

    #[must_use]
    pub fn asked(&self) -> u32 {
        self.asked
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// `correct * 100 / asked`, floored.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        floor_percent(self.correct, self.asked)
    }

    /// Floored accuracy for one word; zero if the word was never asked.
    #[must_use]
    pub fn per_word_accuracy(&self, word: &str) -> u32 {
        self.per_word
            .get(&word_key(word))
            .map_or(0, WordStats::accuracy_percent)
    }

    #[must_use]
    pub fn word_stats(&self, word: &str) -> Option<WordStats> {
        self.per_word.get(&word_key(word)).copied()
    }

    /// Read-only view with per-word rows ordered by lowercased word.
    #[must_use]
    pub fn snapshot(&self) -> SessionStatistics {
        let per_word = self
            .per_word
            .iter()
            .map(|(word, stats)| WordStatsRow {
                word: word.clone(),
                asked: stats.asked,
                correct: stats.correct,
                accuracy_percent: stats.accuracy_percent(),
            })
            .collect();

        SessionStatistics {
            asked: self.asked,
            correct: self.correct,
            streak: self.streak,
            best_streak: self.best_streak,
            accuracy_percent: self.accuracy_percent(),
            per_word,
        }
    }
}

/// Per-word line of a statistics snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordStatsRow {
    pub word: String,
    pub asked: u32,
    pub correct: u32,
    pub accuracy_percent: u32,
}

/// Point-in-time copy of the session statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionStatistics {
    pub asked: u32,
    pub correct: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub accuracy_percent: u32,
    pub per_word: Vec<WordStatsRow>,
}

impl SessionStatistics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asked == 0
    }
}
