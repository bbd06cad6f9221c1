//! Terminal presentation adapter.
//!
//! One inbound action per turn: render the current session snapshot, read a
//! single key, apply exactly one transition, and render again. The session
//! value is owned here and passed `&mut` into every transition; recoverable
//! errors are printed in place and the user retries through a new action.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use tracing::{info, warn};

use crate::clients::CompletionClient;
use crate::error::{QuizforgeError, StateError};
use crate::extract;
use crate::generator::QuizGenerator;
use crate::quiz::{answers_match, Difficulty, OPTION_LABELS};
use crate::report;
use crate::session::{QuizSession, SessionPhase};

/// Startup parameters carried in from the CLI.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Document to quiz on; prompted for interactively when absent.
    pub pdf: Option<PathBuf>,
    pub count: usize,
    pub difficulty: Difficulty,
}

pub struct App<C: CompletionClient> {
    generator: QuizGenerator<C>,
    session: QuizSession,
    out_dir: PathBuf,
}

impl<C: CompletionClient> App<C> {
    pub fn new(generator: QuizGenerator<C>, out_dir: PathBuf) -> Self {
        Self {
            generator,
            session: QuizSession::new(),
            out_dir,
        }
    }

    /// Drive the session until the user quits.
    pub async fn run(&mut self, mut options: RunOptions) -> Result<(), QuizforgeError> {
        loop {
            let keep_going = match self.session.phase() {
                SessionPhase::Uninitialized => self.begin_quiz(&mut options).await?,
                SessionPhase::InProgress => self.play_question()?,
                SessionPhase::Complete => self.finish().await?,
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    /// Uninitialized phase: obtain a document, extract, generate, load.
    async fn begin_quiz(&mut self, options: &mut RunOptions) -> Result<bool, QuizforgeError> {
        let path = match options.pdf.take() {
            Some(path) => path,
            None => match prompt_line("Path to PDF: ")? {
                Some(line) if !line.is_empty() => PathBuf::from(line),
                _ => return Ok(false),
            },
        };

        let document = match extract::extract_text(&path) {
            Ok(document) => document,
            Err(e) => {
                println!("Could not read that document: {e}");
                return Ok(true);
            }
        };
        println!(
            "Extracted {} page(s), {} characters.",
            document.pages,
            document.text.len()
        );

        println!("Generating quiz... please wait.");
        match self
            .generator
            .generate(&document.text, options.count, options.difficulty)
            .await
        {
            Ok(quiz) => {
                self.session
                    .load_quiz(quiz, document.text, options.count, options.difficulty)?;
                info!(questions = self.session.len(), "quiz ready");
                Ok(true)
            }
            Err(e) => {
                println!("Could not generate quiz: {e}");
                match read_key(&['y', 'n'], "Try again with the same document? [y/n] ")? {
                    Some('y') => {
                        options.pdf = Some(path);
                        Ok(true)
                    }
                    Some(_) => Ok(true),
                    None => Ok(false),
                }
            }
        }
    }

    /// InProgress phase: show the current question, take one answer, then
    /// one advance.
    fn play_question(&mut self) -> Result<bool, QuizforgeError> {
        let (index, question) = match self.session.current_question() {
            Some((index, question)) => (index, question.clone()),
            None => return Ok(true),
        };

        println!("---");
        println!("Question {} of {}", index + 1, self.session.len());
        println!("{}", question.text);
        for (label, option) in OPTION_LABELS.iter().zip(&question.options) {
            println!("  {label}. {option}");
        }

        if !self.session.current_answered() {
            let key = match read_key(&['a', 'b', 'c', 'd', 'q'], "Answer [a-d], q to quit: ")? {
                Some('q') | None => return Ok(false),
                Some(key) => key,
            };
            let choice = question
                .options
                .get((key as u8 - b'a') as usize)
                .cloned()
                .unwrap_or_default();
            match self.session.submit(&choice) {
                Ok(outcome) if outcome.correct => println!("✅ Correct!"),
                Ok(outcome) => {
                    println!("❌ Wrong! The correct answer was: {}", outcome.correct_answer);
                }
                // Gated above; reject without corrupting anything.
                Err(e) => warn!(error = %e, "submit rejected"),
            }
        }

        match read_key(&['n', 'q'], "[n]ext, q to quit: ")? {
            Some('n') => {
                self.session.advance()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Complete phase: score, summary, and the end-of-quiz actions.
    async fn finish(&mut self) -> Result<bool, QuizforgeError> {
        println!("---");
        println!("Quiz Complete!");
        println!("Your Final Score: {}/{}", self.session.score(), self.session.len());
        println!();
        self.print_summary();

        loop {
            let action = read_key(
                &['r', 's', 'e', 'q'],
                "[r]egenerate same document, [s]tart over, [e]xport reports, [q]uit: ",
            )?;
            match action {
                Some('r') => {
                    self.regenerate().await?;
                    return Ok(true);
                }
                Some('s') => {
                    self.session.restart()?;
                    return Ok(true);
                }
                Some('e') => match self.export_reports() {
                    Ok(()) => {}
                    Err(e) => println!("Export failed: {e}"),
                },
                _ => return Ok(false),
            }
        }
    }

    /// Re-invoke generation with the stored request. On failure the
    /// completed session is left intact for this interaction.
    async fn regenerate(&mut self) -> Result<(), QuizforgeError> {
        println!("Regenerating quiz... please wait.");
        let source = self.session.source_text().to_string();
        let count = self.session.requested_count();
        let difficulty = self.session.requested_difficulty();

        match self.generator.generate(&source, count, difficulty).await {
            Ok(quiz) => {
                self.session.load_quiz(quiz, source, count, difficulty)?;
                info!(questions = self.session.len(), "quiz regenerated");
            }
            Err(e) => println!("Could not regenerate quiz: {e}"),
        }
        Ok(())
    }

    fn print_summary(&self) {
        let Some(quiz) = self.session.quiz() else {
            return;
        };
        for (i, question) in quiz.iter().enumerate() {
            let user_answer = self.session.recorded_answer(i).unwrap_or("Not answered");
            let marker = if answers_match(user_answer, &question.correct_answer) {
                "✅"
            } else {
                "❌"
            };
            println!("Q{}. {}", i + 1, question.text);
            println!("  Your Answer: {marker} {user_answer}");
            println!("  Correct Answer: {}", question.correct_answer);
        }
        println!();
    }

    /// Write quiz.json, quiz.csv, and summary_report.pdf into the output
    /// directory, overwriting in place.
    fn export_reports(&self) -> Result<(), QuizforgeError> {
        let quiz = self.session.quiz().ok_or(StateError::QuizNotLoaded)?;
        std::fs::create_dir_all(&self.out_dir)?;

        let json_path = self.out_dir.join("quiz.json");
        std::fs::write(&json_path, report::render_json(quiz)?)?;

        let csv_path = self.out_dir.join("quiz.csv");
        std::fs::write(&csv_path, report::render_csv(quiz)?)?;

        let pdf_path = self.out_dir.join("summary_report.pdf");
        std::fs::write(&pdf_path, report::render_summary_pdf(&self.session)?)?;

        println!(
            "Wrote {}, {} and {}.",
            json_path.display(),
            csv_path.display(),
            pdf_path.display()
        );
        Ok(())
    }
}

/// Prompt for a full line. `None` means stdin was closed.
fn prompt_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Read a single action key, case-insensitively, from the set of valid keys.
/// Returns `None` on EOF or Ctrl-C. Without a raw-mode terminal (pipes, CI)
/// this degrades to line input.
fn read_key(valid: &[char], prompt: &str) -> io::Result<Option<char>> {
    print!("{prompt}");
    io::stdout().flush()?;

    if terminal::enable_raw_mode().is_err() {
        return read_key_from_line(valid);
    }

    let picked = loop {
        match event::read() {
            Ok(Event::Key(KeyEvent {
                code, modifiers, ..
            })) => match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => break None,
                KeyCode::Char(c) => {
                    let c = c.to_ascii_lowercase();
                    if valid.contains(&c) {
                        break Some(c);
                    }
                }
                _ => {}
            },
            Ok(_) => {}
            Err(_) => break None,
        }
    };
    let _ = terminal::disable_raw_mode();

    match picked {
        Some(c) => println!("{c}"),
        None => println!(),
    }
    Ok(picked)
}

fn read_key_from_line(valid: &[char]) -> io::Result<Option<char>> {
    let mut line = String::new();
    loop {
        line.clear();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if let Some(c) = line
            .trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase())
            .filter(|c| valid.contains(c))
        {
            return Ok(Some(c));
        }
    }
}
