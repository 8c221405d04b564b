use std::collections::VecDeque;

/// A question presented to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question<'a> {
    /// 1-based position within the quiz.
    pub number: usize,
    pub total: usize,
    pub word: &'a str,
}

/// Outcome of judging one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement {
    pub word: String,
    pub expected: String,
    pub given: String,
    pub correct: bool,
}

/// Pull-based provider of learner answers.
///
/// Returning `None`, or a blank string, ends the quiz early.
pub trait AnswerSource {
    fn next_answer(&mut self, question: &Question<'_>) -> Option<String>;

    /// Called after each judged answer.
    fn feedback(&mut self, _judgement: &Judgement) {}
}

/// Answers from a fixed script. Records which words were asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    answers: VecDeque<Option<String>>,
    asked: Vec<String>,
    judgements: Vec<Judgement>,
}

impl ScriptedAnswers {
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| Some(a.into())).collect(),
            ..Self::default()
        }
    }

    /// Words presented so far, in order.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    #[must_use]
    pub fn judgements(&self) -> &[Judgement] {
        &self.judgements
    }
}

impl AnswerSource for ScriptedAnswers {
    fn next_answer(&mut self, question: &Question<'_>) -> Option<String> {
        self.asked.push(question.word.to_owned());
        self.answers.pop_front().flatten()
    }

    fn feedback(&mut self, judgement: &Judgement) {
        self.judgements.push(judgement.clone());
    }
}
