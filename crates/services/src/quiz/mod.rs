mod answer;
mod session;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use answer::{AnswerSource, Judgement, Question, ScriptedAnswers};
pub use session::{QuizOutcome, QuizSession, QuizState};
