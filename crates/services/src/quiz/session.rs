use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use vocab_core::Clock;
use vocab_core::model::{QuizScore, StatisticsTracker, VocabularyEntry};

use super::answer::{AnswerSource, Judgement, Question};
use crate::error::QuizError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    Running,
    Completed,
    AbortedEarly,
}

impl QuizState {
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, QuizState::Completed | QuizState::AbortedEarly)
    }
}

/// Result of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: QuizScore,
    pub state: QuizState,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl QuizOutcome {
    #[must_use]
    pub fn percent(&self) -> u32 {
        self.score.percent()
    }

    #[must_use]
    pub fn aborted_early(&self) -> bool {
        self.state == QuizState::AbortedEarly
    }

    /// Wall time between start and the last answer (or early exit).
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.finished_at - self.started_at
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A single randomized pass over a snapshot of the vocabulary.
///
/// Owns a shuffled copy of the entries; the caller's list is never reordered.
#[derive(Debug, Clone)]
pub struct QuizSession {
    order: Vec<VocabularyEntry>,
    current: usize,
    correct: u32,
    judged: u32,
    state: QuizState,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Snapshot `entries` into a new, not yet started session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` if `entries` is empty.
    pub fn new(entries: &[VocabularyEntry]) -> Result<Self, QuizError> {
        if entries.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        Ok(Self {
            order: entries.to_vec(),
            current: 0,
            correct: 0,
            judged: 0,
            state: QuizState::NotStarted,
            started_at: None,
            finished_at: None,
        })
    }

    /// Shuffle the snapshot and begin asking.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotRunning` if the session was already started.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        started_at: DateTime<Utc>,
    ) -> Result<(), QuizError> {
        if self.state != QuizState::NotStarted {
            return Err(QuizError::NotRunning);
        }
        self.order.shuffle(rng);
        self.state = QuizState::Running;
        self.started_at = Some(started_at);
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    /// Entries in the order they are asked.
    #[must_use]
    pub fn order(&self) -> &[VocabularyEntry] {
        &self.order
    }

    #[must_use]
    pub fn current_entry(&self) -> Option<&VocabularyEntry> {
        if self.state == QuizState::Running {
            self.order.get(self.current)
        } else {
            None
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<Question<'_>> {
        self.current_entry().map(|entry| Question {
            number: self.current + 1,
            total: self.order.len(),
            word: entry.word(),
        })
    }

    /// Score so far: correct answers over answers judged.
    #[must_use]
    pub fn score(&self) -> QuizScore {
        QuizScore::new(self.correct, self.judged)
    }

    /// Judge an answer for the current entry and record it in `stats`.
    ///
    /// A blank or missing answer ends the session early and returns `Ok(None)`;
    /// the entry it was given for is not counted.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotRunning` if the session is not running.
    pub fn answer(
        &mut self,
        answer: Option<&str>,
        stats: &mut StatisticsTracker,
        now: DateTime<Utc>,
    ) -> Result<Option<Judgement>, QuizError> {
        let Some(entry) = self.current_entry() else {
            return Err(QuizError::NotRunning);
        };

        let given = match answer.map(str::trim) {
            Some(given) if !given.is_empty() => given,
            _ => {
                self.finish(QuizState::AbortedEarly, now);
                return Ok(None);
            }
        };

        let correct = entry.accepts_answer(given);
        let judgement = Judgement {
            word: entry.word().to_owned(),
            expected: entry.meaning().to_owned(),
            given: given.to_owned(),
            correct,
        };

        stats.record_result(&judgement.word, correct);
        self.judged = self.judged.saturating_add(1);
        if correct {
            self.correct = self.correct.saturating_add(1);
        }

        self.current += 1;
        if self.current >= self.order.len() {
            self.finish(QuizState::Completed, now);
        }

        Ok(Some(judgement))
    }

    fn finish(&mut self, state: QuizState, now: DateTime<Utc>) {
        self.state = state;
        self.finished_at = Some(now);
    }

    /// Final outcome once the session has finished.
    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        if !self.state.is_finished() {
            return None;
        }
        let finished_at = self.finished_at?;
        Some(QuizOutcome {
            score: self.score(),
            state: self.state,
            started_at: self.started_at.unwrap_or(finished_at),
            finished_at,
        })
    }

    /// Drive the whole session, pulling answers from `answers` until every entry is
    /// judged or the learner exits early.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotRunning` if the session was already started.
    pub fn run<R, A>(
        mut self,
        rng: &mut R,
        answers: &mut A,
        stats: &mut StatisticsTracker,
        clock: &Clock,
    ) -> Result<QuizOutcome, QuizError>
    where
        R: Rng + ?Sized,
        A: AnswerSource + ?Sized,
    {
        self.start(rng, clock.now())?;

        while let Some(question) = self.current_question() {
            let given = answers.next_answer(&question);
            if let Some(judgement) = self.answer(given.as_deref(), stats, clock.now())? {
                answers.feedback(&judgement);
            }
        }

        let outcome = self.outcome().ok_or(QuizError::NotRunning)?;
        tracing::info!(
            score = outcome.score.score,
            total = outcome.score.total,
            percent = outcome.percent(),
            aborted_early = outcome.aborted_early(),
            elapsed_ms = outcome.elapsed().num_milliseconds(),
            "quiz finished"
        );
        Ok(outcome)
    }
}
