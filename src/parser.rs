//! Turns raw completion output into a [`QuizSet`].
//!
//! Models wrap JSON in code fences, nest the question array under an
//! arbitrary key, or emit bare answer letters instead of option text. All of
//! that is repaired here; anything else is rejected with a recoverable
//! [`ParseError`].

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::quiz::{Question, QuizSet, MISSING_OPTION, OPTIONS_PER_QUESTION};

/// Question object as the model actually emits it: `question` is required,
/// the rest is repaired during normalization.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    answer: String,
}

/// Parse a raw model response into a normalized quiz.
pub fn parse_quiz(raw: &str) -> Result<QuizSet, ParseError> {
    let stripped = strip_code_fences(raw);

    let value: Value = serde_json::from_str(stripped)
        .map_err(|e| ParseError::MalformedJson(e, stripped.to_string()))?;

    let raw_questions = decode_question_array(value)?;
    let quiz: QuizSet = raw_questions.into_iter().map(normalize_question).collect();

    if quiz.is_empty() {
        return Err(ParseError::EmptyQuiz);
    }
    debug!(questions = quiz.len(), "parsed quiz from model response");
    Ok(quiz)
}

/// Remove a leading/trailing fenced-code-block marker, optionally tagged
/// `json`, leaving the payload untouched.
fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest)
            .trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

/// Accepts two shapes: a top-level array of question objects, or a top-level
/// object whose first array-of-question-objects value is taken as the quiz.
fn decode_question_array(value: Value) -> Result<Vec<RawQuestion>, ParseError> {
    match value {
        Value::Array(_) => {
            serde_json::from_value(value).map_err(|_| ParseError::UnrecognizedFormat)
        }
        Value::Object(map) => {
            for (key, candidate) in map {
                if !looks_like_question_array(&candidate) {
                    continue;
                }
                debug!(key = %key, "quiz array found nested under object key");
                return serde_json::from_value(candidate)
                    .map_err(|_| ParseError::UnrecognizedFormat);
            }
            Err(ParseError::UnrecognizedFormat)
        }
        _ => Err(ParseError::UnrecognizedFormat),
    }
}

fn looks_like_question_array(value: &Value) -> bool {
    match value {
        Value::Array(items) => items
            .first()
            .map(|first| first.get("question").is_some())
            .unwrap_or(false),
        _ => false,
    }
}

/// Trim everything, replace bare-letter options with the missing-option
/// placeholder, and force the option count to exactly four.
fn normalize_question(raw: RawQuestion) -> Question {
    let mut options: Vec<String> = raw
        .options
        .iter()
        .take(OPTIONS_PER_QUESTION)
        .map(|opt| normalize_option(opt))
        .collect();
    if options.len() < OPTIONS_PER_QUESTION {
        warn!(
            question = %raw.question,
            provided = options.len(),
            "question arrived with too few options; padding"
        );
        options.resize(OPTIONS_PER_QUESTION, MISSING_OPTION.to_string());
    }

    Question {
        text: raw.question.trim().to_string(),
        options,
        correct_answer: raw.answer.trim().to_string(),
    }
}

fn normalize_option(option: &str) -> String {
    let trimmed = option.trim();
    let mut chars = trimmed.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        if letter.is_ascii_alphabetic() && matches!(letter.to_ascii_uppercase(), 'A'..='D') {
            return MISSING_OPTION.to_string();
        }
    }
    trimmed.to_string()
}
