use std::fs;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    AnswerSource, Clock, Question, QuizError, QuizState, ScriptedAnswers, VocabularyApp,
    VocabularyError,
};
use storage::json::JsonFileRepository;
use storage::repository::{InMemoryRepository, Storage};
use tempfile::TempDir;
use vocab_core::model::QuizScore;
use vocab_core::time::fixed_now;

/// Answers the first `correct` questions with the right meaning, then sends a blank line.
struct KnowsFirst {
    meanings: Vec<(String, String)>,
    correct: usize,
    asked: Vec<String>,
}

impl AnswerSource for KnowsFirst {
    fn next_answer(&mut self, question: &Question<'_>) -> Option<String> {
        self.asked.push(question.word.to_owned());
        if self.asked.len() > self.correct {
            return Some(String::new());
        }
        self.meanings
            .iter()
            .find(|(word, _)| word == question.word)
            .map(|(_, meaning)| meaning.clone())
    }
}

fn seeded_app() -> VocabularyApp {
    let mut app = VocabularyApp::new(
        Clock::fixed(fixed_now()),
        Arc::new(InMemoryRepository::new()),
    );
    app.add_word("ephemeral", "lasting a short time").unwrap();
    app.add_word("laconic", "using very few words").unwrap();
    app.add_word("zeal", "great energy or enthusiasm").unwrap();
    app
}

#[test]
fn two_correct_then_blank_reports_two_of_two() {
    let mut app = seeded_app();
    let meanings = app
        .list_entries()
        .iter()
        .map(|e| (e.word().to_owned(), e.meaning().to_owned()))
        .collect();
    let mut answers = KnowsFirst {
        meanings,
        correct: 2,
        asked: Vec::new(),
    };

    let outcome = app
        .run_quiz(&mut StdRng::seed_from_u64(42), &mut answers)
        .unwrap();

    assert_eq!(outcome.score, QuizScore::new(2, 2));
    assert_eq!(outcome.percent(), 100);
    assert_eq!(outcome.state, QuizState::AbortedEarly);
    // The blank was given on the third prompt; nothing after it.
    assert_eq!(answers.asked.len(), 3);

    let stats = app.statistics();
    assert_eq!(stats.asked, 2);
    assert_eq!(stats.correct, 2);
    assert_eq!(stats.best_streak, 2);
}

#[test]
fn quiz_leaves_store_order_untouched() {
    let mut app = seeded_app();
    let before: Vec<String> = app.list_entries().iter().map(|e| e.word().to_owned()).collect();

    let mut answers = ScriptedAnswers::new(["x", "y", "z"]);
    let outcome = app
        .run_quiz(&mut StdRng::seed_from_u64(9), &mut answers)
        .unwrap();

    let after: Vec<String> = app.list_entries().iter().map(|e| e.word().to_owned()).collect();
    assert_eq!(before, after);
    assert_eq!(outcome.state, QuizState::Completed);
    assert_eq!(outcome.score, QuizScore::new(0, 3));

    let mut asked = answers.asked().to_vec();
    asked.sort();
    assert_eq!(asked, before);
}

#[test]
fn statistics_accumulate_across_quizzes() {
    let mut app = seeded_app();

    let mut first = ScriptedAnswers::new(["wrong", "wrong", "wrong"]);
    app.run_quiz(&mut StdRng::seed_from_u64(1), &mut first).unwrap();
    let mut second = ScriptedAnswers::new(["nope"]);
    app.run_quiz(&mut StdRng::seed_from_u64(2), &mut second).unwrap();

    let stats = app.statistics();
    assert_eq!(stats.asked, 4);
    assert_eq!(stats.correct, 0);
    assert_eq!(stats.accuracy_percent, 0);
    assert_eq!(stats.per_word.len(), 3);
}

#[test]
fn empty_vocabulary_reports_no_questions() {
    let mut app = VocabularyApp::new(
        Clock::fixed(fixed_now()),
        Arc::new(InMemoryRepository::new()),
    );
    let mut answers = ScriptedAnswers::new(["unused"]);

    assert_eq!(
        app.run_quiz(&mut StdRng::seed_from_u64(0), &mut answers),
        Err(QuizError::NoQuestions)
    );
    assert!(answers.asked().is_empty());
}

#[test]
fn json_file_round_trip_through_app() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vocabulary.json");
    let storage = Storage::json_file(&path);

    let mut app = VocabularyApp::open(Clock::fixed(fixed_now()), &storage);
    assert!(app.list_entries().is_empty());
    app.add_word("Ephemeral", "lasting a short time").unwrap();
    app.add_word("laconic", "using very few words").unwrap();
    assert_eq!(
        app.add_word("EPHEMERAL", "again"),
        Err(VocabularyError::DuplicateWord {
            word: "Ephemeral".into()
        })
    );
    app.save_to_disk().unwrap();

    let reopened = VocabularyApp::open(Clock::fixed(fixed_now()), &storage);
    assert_eq!(reopened.list_entries(), app.list_entries());
}

#[test]
fn corrupt_file_starts_empty_and_is_replaced_on_save() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vocabulary.json");
    fs::write(&path, "{\"word\": \"not an array\"}").unwrap();

    let mut app = VocabularyApp::new(
        Clock::fixed(fixed_now()),
        Arc::new(JsonFileRepository::new(&path)),
    );
    assert_eq!(app.load_from_disk(), 0);

    app.add_word("zeal", "great energy").unwrap();
    app.save_to_disk().unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"zeal\""));
    assert!(!raw.contains("not an array"));
}

#[test]
fn partially_valid_file_keeps_valid_entry() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vocabulary.json");
    fs::write(
        &path,
        r#"[{"word": "zeal", "meaning": "great energy"}, {"word": "", "meaning": "blank"}]"#,
    )
    .unwrap();

    let app = VocabularyApp::open(Clock::fixed(fixed_now()), &Storage::json_file(&path));
    assert_eq!(app.list_entries().len(), 1);
    assert_eq!(app.list_entries()[0].word(), "zeal");
}
