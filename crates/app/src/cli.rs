use std::io::{self, BufRead, Write};

use rand::Rng;
use services::{AnswerSource, Judgement, Question, QuizError, VocabularyApp};
use tokio::sync::watch;
use vocab_core::model::{SessionStatistics, VocabularyEntry};

/// Latest vocabulary state, published for the interrupt handler.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub entries: Vec<VocabularyEntry>,
    pub unsaved: bool,
}

impl Snapshot {
    #[must_use]
    pub fn of(app: &VocabularyApp) -> Self {
        Self {
            entries: app.list_entries().to_vec(),
            unsaved: app.has_unsaved_changes(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Quiz,
    List,
    Stats,
    Save,
    Exit,
}

impl MenuChoice {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Quiz),
            "3" => Some(Self::List),
            "4" => Some(Self::Stats),
            "5" => Some(Self::Save),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Text menu over stdin/stdout, or any reader/writer pair in tests.
pub struct Cli<R, W, G> {
    input: R,
    output: W,
    rng: G,
    snapshots: Option<watch::Sender<Snapshot>>,
}

impl<R: BufRead, W: Write, G: Rng> Cli<R, W, G> {
    pub fn new(input: R, output: W, rng: G) -> Self {
        Self {
            input,
            output,
            rng,
            snapshots: None,
        }
    }

    #[must_use]
    pub fn with_snapshots(mut self, tx: watch::Sender<Snapshot>) -> Self {
        self.snapshots = Some(tx);
        self
    }

    /// Run the menu until the learner exits or input ends.
    ///
    /// Unsaved words are written before returning, also when the terminal fails.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the terminal cannot be read or written.
    pub fn run(&mut self, app: &mut VocabularyApp, save_on_exit: bool) -> io::Result<()> {
        let result = self.menu_loop(app);

        let reported = if save_on_exit && app.has_unsaved_changes() {
            self.save(app)
        } else {
            Ok(())
        };
        result?;
        reported?;

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    fn menu_loop(&mut self, app: &mut VocabularyApp) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let Some(line) = read_line(&mut self.input)? else {
                writeln!(self.output)?;
                return Ok(());
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Add) => self.add_words(app)?,
                Some(MenuChoice::Quiz) => self.quiz(app)?,
                Some(MenuChoice::List) => self.list(app)?,
                Some(MenuChoice::Stats) => print_statistics(&mut self.output, &app.statistics())?,
                Some(MenuChoice::Save) => self.save(app)?,
                Some(MenuChoice::Exit) => return Ok(()),
                None => writeln!(self.output, "Invalid choice. Please enter a number from 1 to 6.")?,
            }
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Vocabulary App")?;
        writeln!(self.output, "1. Add words")?;
        writeln!(self.output, "2. Quiz me")?;
        writeln!(self.output, "3. List words")?;
        writeln!(self.output, "4. Show statistics")?;
        writeln!(self.output, "5. Save")?;
        writeln!(self.output, "6. Exit")?;
        prompt(&mut self.output, "Choose an option (1-6): ")
    }

    fn add_words(&mut self, app: &mut VocabularyApp) -> io::Result<()> {
        loop {
            prompt(&mut self.output, "Word: ")?;
            let Some(word) = read_line(&mut self.input)? else {
                return Ok(());
            };
            prompt(&mut self.output, "Meaning: ")?;
            let Some(meaning) = read_line(&mut self.input)? else {
                return Ok(());
            };

            match app.add_word(&word, &meaning) {
                Ok(()) => {
                    writeln!(self.output, "Added '{}'.", word.trim())?;
                    self.publish(app);
                }
                Err(err) => writeln!(self.output, "Not added: {err}.")?,
            }

            prompt(&mut self.output, "Add another word? (y/n): ")?;
            let again = read_line(&mut self.input)?.unwrap_or_default();
            if !matches!(again.trim().to_lowercase().as_str(), "y" | "yes") {
                return Ok(());
            }
        }
    }

    fn quiz(&mut self, app: &mut VocabularyApp) -> io::Result<()> {
        let mut answers = PromptAnswers {
            input: &mut self.input,
            output: &mut self.output,
        };
        let result = app.run_quiz(&mut self.rng, &mut answers);

        match result {
            Ok(outcome) => {
                if outcome.aborted_early() {
                    writeln!(self.output, "Quiz stopped early.")?;
                }
                writeln!(self.output, "You scored {}.", outcome.score)?;
            }
            Err(QuizError::NoQuestions) => {
                writeln!(self.output, "No questions available. Add some words first.")?;
            }
            Err(err) => writeln!(self.output, "Quiz failed: {err}.")?,
        }
        Ok(())
    }

    fn list(&mut self, app: &VocabularyApp) -> io::Result<()> {
        let entries = app.list_entries();
        if entries.is_empty() {
            return writeln!(self.output, "No words yet.");
        }
        for (idx, entry) in entries.iter().enumerate() {
            writeln!(self.output, "{}. {} - {}", idx + 1, entry.word(), entry.meaning())?;
        }
        Ok(())
    }

    fn save(&mut self, app: &mut VocabularyApp) -> io::Result<()> {
        match app.save_to_disk() {
            Ok(()) => {
                writeln!(self.output, "Saved {} words.", app.list_entries().len())?;
                self.publish(app);
            }
            Err(err) => writeln!(
                self.output,
                "Warning: could not save ({err}). Your words are kept for this session."
            )?,
        }
        Ok(())
    }

    fn publish(&self, app: &VocabularyApp) {
        if let Some(tx) = &self.snapshots {
            tx.send_replace(Snapshot::of(app));
        }
    }
}

/// Quiz answers read line by line. End of input ends the quiz.
struct PromptAnswers<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> AnswerSource for PromptAnswers<'_, R, W> {
    fn next_answer(&mut self, question: &Question<'_>) -> Option<String> {
        let text = format!(
            "[{}/{}] What does '{}' mean? (blank line to stop): ",
            question.number, question.total, question.word
        );
        if let Err(err) = prompt(&mut *self.output, &text) {
            tracing::warn!(%err, "failed to write quiz prompt");
            return None;
        }
        match read_line(&mut *self.input) {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(%err, "failed to read quiz answer");
                None
            }
        }
    }

    fn feedback(&mut self, judgement: &Judgement) {
        let written = if judgement.correct {
            writeln!(self.output, "Correct!")
        } else {
            writeln!(self.output, "Wrong. The answer is: {}", judgement.expected)
        };
        if let Err(err) = written {
            tracing::warn!(%err, "failed to write quiz feedback");
        }
    }
}

fn prompt<W: Write + ?Sized>(output: &mut W, text: &str) -> io::Result<()> {
    write!(output, "{text}")?;
    output.flush()
}

/// Read one line without its terminator. `None` at end of input.
///
/// Bytes that are not UTF-8 become U+FFFD instead of failing the read.
fn read_line<R: BufRead + ?Sized>(input: &mut R) -> io::Result<Option<String>> {
    let mut raw = Vec::new();
    if input.read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&raw);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}

fn print_statistics<W: Write>(output: &mut W, stats: &SessionStatistics) -> io::Result<()> {
    if stats.is_empty() {
        return writeln!(output, "No questions answered this session.");
    }
    writeln!(
        output,
        "Answered: {}  Correct: {}  Accuracy: {}%",
        stats.asked, stats.correct, stats.accuracy_percent
    )?;
    writeln!(
        output,
        "Current streak: {}  Best streak: {}",
        stats.streak, stats.best_streak
    )?;
    for row in &stats.per_word {
        writeln!(
            output,
            "  {}: {}/{} ({}%)",
            row.word, row.correct, row.asked, row.accuracy_percent
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use services::Clock;
    use storage::repository::{InMemoryRepository, VocabularyRepository};
    use vocab_core::time::fixed_now;

    fn run_script(app: &mut VocabularyApp, script: &str, save_on_exit: bool) -> String {
        let mut output = Vec::new();
        {
            let mut cli = Cli::new(
                Cursor::new(script.as_bytes().to_vec()),
                &mut output,
                StdRng::seed_from_u64(3),
            );
            cli.run(app, save_on_exit).unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    fn app_with(repo: &InMemoryRepository) -> VocabularyApp {
        VocabularyApp::new(Clock::fixed(fixed_now()), Arc::new(repo.clone()))
    }

    #[test]
    fn add_loop_adds_until_declined_and_saves_on_exit() {
        let repo = InMemoryRepository::new();
        let mut app = app_with(&repo);

        let out = run_script(
            &mut app,
            "1\nephemeral\nlasting a short time\ny\nzeal\ngreat energy\nn\n6\n",
            true,
        );

        assert!(out.contains("Added 'ephemeral'."));
        assert!(out.contains("Added 'zeal'."));
        assert!(out.contains("Saved 2 words."));
        assert!(out.ends_with("Goodbye!\n"));
        assert_eq!(repo.load_entries().unwrap().len(), 2);
    }

    #[test]
    fn add_reports_validation_errors() {
        let repo = InMemoryRepository::new();
        let mut app = app_with(&repo);

        let out = run_script(&mut app, "1\nword\nmeaning\ny\nWORD\nother\ny\n \nx\nn\n6\n", false);

        assert!(out.contains("Not added: 'word' is already in the vocabulary."));
        assert!(out.contains("Not added: word must not be empty."));
        assert_eq!(app.list_entries().len(), 1);
        assert!(repo.load_entries().unwrap().is_empty());
    }

    #[test]
    fn quiz_on_empty_vocabulary_prints_notice() {
        let repo = InMemoryRepository::new();
        let mut app = app_with(&repo);

        let out = run_script(&mut app, "2\n6\n", false);
        assert!(out.contains("No questions available."));
        assert!(!out.contains("What does"));
    }

    #[test]
    fn quiz_blank_line_stops_and_reports_score() {
        let repo = InMemoryRepository::new();
        let mut app = app_with(&repo);
        app.add_word("solo", "alone").unwrap();
        app.add_word("duo", "pair").unwrap();

        let out = run_script(&mut app, "2\n\n4\n6\n", false);

        assert!(out.contains("[1/2] What does"));
        assert!(!out.contains("[2/2]"));
        assert!(out.contains("Quiz stopped early."));
        assert!(out.contains("You scored 0/0 (0%)."));
        assert!(out.contains("No questions answered this session."));
    }

    #[test]
    fn list_and_statistics_after_quiz() {
        let repo = InMemoryRepository::new();
        let mut app = app_with(&repo);
        app.add_word("solo", "alone").unwrap();

        let out = run_script(&mut app, "3\n2\nALONE\n4\n6\n", false);

        assert!(out.contains("1. solo - alone"));
        assert!(out.contains("Correct!"));
        assert!(out.contains("You scored 1/1 (100%)."));
        assert!(out.contains("Answered: 1  Correct: 1  Accuracy: 100%"));
        assert!(out.contains("  solo: 1/1 (100%)"));
    }

    #[test]
    fn wrong_answer_shows_expected_meaning() {
        let repo = InMemoryRepository::new();
        let mut app = app_with(&repo);
        app.add_word("solo", "alone").unwrap();

        let out = run_script(&mut app, "2\ntogether\n6\n", false);
        assert!(out.contains("Wrong. The answer is: alone"));
        assert!(out.contains("You scored 0/1 (0%)."));
    }

    #[test]
    fn invalid_choice_and_end_of_input() {
        let repo = InMemoryRepository::new();
        let mut app = app_with(&repo);

        let out = run_script(&mut app, "9\n", false);
        assert!(out.contains("Invalid choice."));
        assert!(out.ends_with("Goodbye!\n"));
    }

    /// Yields the given bytes, then fails every further read.
    struct BrokenAfter(Cursor<Vec<u8>>);

    impl io::Read for BrokenAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.read(buf)? {
                0 => Err(io::Error::other("terminal went away")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn non_utf8_choice_is_rejected_and_words_still_saved() {
        let repo = InMemoryRepository::new();
        let mut app = app_with(&repo);

        let mut output = Vec::new();
        {
            let mut cli = Cli::new(
                Cursor::new(b"1\nduo\npair\nn\ncaf\xe9\n6\n".to_vec()),
                &mut output,
                StdRng::seed_from_u64(2),
            );
            cli.run(&mut app, true).unwrap();
        }
        let out = String::from_utf8_lossy(&output);
        assert!(out.contains("Invalid choice."));
        assert!(out.ends_with("Goodbye!\n"));
        assert_eq!(repo.load_entries().unwrap().len(), 1);
        assert_eq!(repo.load_entries().unwrap()[0].word(), "duo");
    }

    #[test]
    fn read_failure_still_saves_unsaved_words() {
        let repo = InMemoryRepository::new();
        let mut app = app_with(&repo);

        let mut output = Vec::new();
        let result = {
            let script = b"1\nsolo\nalone\nn\n".to_vec();
            let input = io::BufReader::new(BrokenAfter(Cursor::new(script)));
            let mut cli = Cli::new(input, &mut output, StdRng::seed_from_u64(4));
            cli.run(&mut app, true)
        };

        assert!(result.is_err());
        let persisted = repo.load_entries().unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].word(), "solo");
        assert!(!app.has_unsaved_changes());
    }

    #[test]
    fn exit_without_changes_leaves_file_alone() {
        let existing = vec![VocabularyEntry::new("kept", "untouched").unwrap()];
        let repo = InMemoryRepository::with_entries(existing.clone());
        // Not loaded, as after a failed read: memory is empty and clean.
        let mut app = app_with(&repo);

        let out = run_script(&mut app, "6\n", true);

        assert!(!out.contains("Saved"));
        assert_eq!(repo.load_entries().unwrap(), existing);
    }

    #[test]
    fn adds_are_published_to_snapshot_channel() {
        let repo = InMemoryRepository::new();
        let mut app = app_with(&repo);
        let (tx, rx) = watch::channel(Snapshot::of(&app));

        let mut output = Vec::new();
        let mut cli = Cli::new(
            Cursor::new(b"1\nsolo\nalone\nn\n6\n".to_vec()),
            &mut output,
            StdRng::seed_from_u64(1),
        )
        .with_snapshots(tx);
        cli.run(&mut app, false).unwrap();

        let snapshot = rx.borrow().clone();
        assert!(snapshot.unsaved);
        assert_eq!(snapshot.entries.len(), 1);
    }
}
