//! The quiz session state machine.
//!
//! One logical session per running instance; interactions are serialized, so
//! every transition runs to completion against `&mut self` before the next
//! render. Illegal transitions are rejected with [`StateError`] and leave the
//! session untouched.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::StateError;
use crate::quiz::{answers_match, Difficulty, Question, QuizSet};

/// Coarse phase derived from the session contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No quiz loaded.
    Uninitialized,
    /// Questions remain at or after the current position.
    InProgress,
    /// Every question has been answered and advanced past.
    Complete,
}

/// Verdict returned by [`QuizSession::submit`] for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub correct_answer: String,
}

/// All mutable data describing progress through one quiz.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    quiz: Option<QuizSet>,
    position: usize,
    score: usize,
    answered: Vec<bool>,
    recorded_answers: BTreeMap<usize, String>,
    source_text: String,
    requested_count: usize,
    requested_difficulty: Difficulty,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.quiz {
            None => SessionPhase::Uninitialized,
            Some(quiz) if self.position >= quiz.len() => SessionPhase::Complete,
            Some(_) => SessionPhase::InProgress,
        }
    }

    /// Install a freshly generated quiz, resetting all per-question records.
    ///
    /// Legal from `Uninitialized` or `Complete` only; generation never fires
    /// mid-quiz.
    pub fn load_quiz(
        &mut self,
        quiz: QuizSet,
        source_text: String,
        requested_count: usize,
        requested_difficulty: Difficulty,
    ) -> Result<(), StateError> {
        if self.phase() == SessionPhase::InProgress {
            return Err(StateError::QuizInProgress);
        }
        let len = quiz.len();
        self.answered = vec![false; len];
        self.recorded_answers.clear();
        self.position = 0;
        self.score = 0;
        self.quiz = Some(quiz);
        self.source_text = source_text;
        self.requested_count = requested_count;
        self.requested_difficulty = requested_difficulty;
        debug!(questions = len, "quiz loaded into session");
        Ok(())
    }

    /// Record an answer for the current question and score it.
    ///
    /// A repeated submit at the same position is rejected without any state
    /// change, so the score can never be double-counted.
    pub fn submit(&mut self, choice: &str) -> Result<SubmitOutcome, StateError> {
        let quiz = self.quiz.as_ref().ok_or(StateError::QuizNotLoaded)?;
        let question = quiz.get(self.position).ok_or(StateError::QuizComplete)?;
        if self.answered[self.position] {
            return Err(StateError::AlreadyAnswered {
                index: self.position,
            });
        }

        let correct = answers_match(choice, &question.correct_answer);
        let correct_answer = question.correct_answer.clone();

        self.recorded_answers
            .insert(self.position, choice.to_string());
        self.answered[self.position] = true;
        if correct {
            self.score += 1;
        }
        debug!(
            position = self.position,
            correct,
            score = self.score,
            "answer submitted"
        );

        Ok(SubmitOutcome {
            correct,
            correct_answer,
        })
    }

    /// Move to the next question. Legal only once the current question has
    /// been answered; reaching the end of the quiz is the `Complete` phase.
    pub fn advance(&mut self) -> Result<SessionPhase, StateError> {
        let quiz = self.quiz.as_ref().ok_or(StateError::QuizNotLoaded)?;
        if self.position >= quiz.len() {
            return Err(StateError::QuizComplete);
        }
        if !self.answered[self.position] {
            return Err(StateError::NotYetAnswered {
                index: self.position,
            });
        }
        self.position += 1;
        Ok(self.phase())
    }

    /// Discard the whole session, source text included. Legal only from
    /// `Complete`.
    pub fn restart(&mut self) -> Result<(), StateError> {
        if self.phase() != SessionPhase::Complete {
            return Err(StateError::QuizNotComplete);
        }
        *self = Self::default();
        Ok(())
    }

    /// The current question, if the session is in progress.
    pub fn current_question(&self) -> Option<(usize, &Question)> {
        let quiz = self.quiz.as_ref()?;
        quiz.get(self.position).map(|q| (self.position, q))
    }

    pub fn current_answered(&self) -> bool {
        self.answered.get(self.position).copied().unwrap_or(false)
    }

    pub fn quiz(&self) -> Option<&QuizSet> {
        self.quiz.as_ref()
    }

    pub fn len(&self) -> usize {
        self.quiz.as_ref().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn recorded_answer(&self, index: usize) -> Option<&str> {
        self.recorded_answers.get(&index).map(String::as_str)
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn requested_count(&self) -> usize {
        self.requested_count
    }

    pub fn requested_difficulty(&self) -> Difficulty {
        self.requested_difficulty
    }
}
