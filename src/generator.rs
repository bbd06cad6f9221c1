//! Prompt assembly and the generate operation: one bounded completion call,
//! one parse. Parser failures are surfaced to the caller, never retried
//! automatically.

use std::time::Duration;

use schemars::schema_for;
use tracing::{debug, info, instrument};

use crate::clients::CompletionClient;
use crate::error::{AIError, GenerateError};
use crate::parser::parse_quiz;
use crate::quiz::{Difficulty, Question, QuizSet};

/// Upper bound on the source excerpt embedded in the prompt, honoring
/// upstream request-size limits.
pub const MAX_SOURCE_CHARS: usize = 2000;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Ceiling on one completion round trip.
    pub request_timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Wraps a completion client with quiz-specific prompting and parsing.
#[derive(Debug, Clone)]
pub struct QuizGenerator<C: CompletionClient> {
    client: C,
    config: GeneratorConfig,
}

impl<C: CompletionClient> QuizGenerator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate a quiz over `source_text`. On any failure the caller's
    /// session is untouched; the user retries through the regenerate action.
    #[instrument(
        skip_all,
        fields(source_len = source_text.len(), count, difficulty = %difficulty)
    )]
    pub async fn generate(
        &self,
        source_text: &str,
        count: usize,
        difficulty: Difficulty,
    ) -> Result<QuizSet, GenerateError> {
        let prompt = build_prompt(source_text, count, difficulty);
        debug!(prompt_len = prompt.len(), "sending generation prompt");

        let raw = tokio::time::timeout(self.config.request_timeout, self.client.complete(prompt))
            .await
            .map_err(|_| AIError::Timeout {
                secs: self.config.request_timeout.as_secs(),
            })??;

        let quiz = parse_quiz(&raw)?;
        info!(questions = quiz.len(), "quiz generated");
        Ok(quiz)
    }
}

/// Assemble the generation prompt: requested count, the difficulty
/// instruction table, the output rules, a schema block for the expected
/// array, and the truncated source excerpt.
pub fn build_prompt(source_text: &str, count: usize, difficulty: Difficulty) -> String {
    let schema = schema_for!(Vec<Question>);
    let schema_json = serde_json::to_string_pretty(&schema)
        .unwrap_or_else(|_| "Schema serialization failed".to_string());

    format!(
        "Create exactly {count} multiple-choice quiz questions from the following text.\n\
         \n\
         Difficulty Level: {difficulty}\n\
         - Easy: {easy}\n\
         - Medium: {medium}\n\
         - Hard: {hard}\n\
         \n\
         Each question must have:\n\
         - \"question\": the full question text.\n\
         - \"options\": an array of 4 full answer choices (not just letters).\n\
         - \"answer\": the correct answer, copied exactly from one of the options.\n\
         \n\
         Rules:\n\
         - Options must be complete meaningful answers, not just \"A, B, C, D\".\n\
         - The correct answer must match exactly one of the options.\n\
         - Return ONLY valid JSON (array of objects with \"question\", \"options\", \"answer\").\n\
         \n\
         ## Response Format\n\
         The JSON must match this schema:\n\
         ```json\n\
         {schema_json}\n\
         ```\n\
         \n\
         Text:\n\
         {excerpt}",
        count = count,
        difficulty = difficulty,
        easy = Difficulty::Easy.instruction(),
        medium = Difficulty::Medium.instruction(),
        hard = Difficulty::Hard.instruction(),
        schema_json = schema_json,
        excerpt = truncated_excerpt(source_text, MAX_SOURCE_CHARS),
    )
}

/// First `max_chars` characters of `text`, on a char boundary.
fn truncated_excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_is_bounded_and_char_safe() {
        let text = "é".repeat(3000);
        let excerpt = truncated_excerpt(&text, MAX_SOURCE_CHARS);
        assert_eq!(excerpt.chars().count(), MAX_SOURCE_CHARS);

        assert_eq!(truncated_excerpt("short", MAX_SOURCE_CHARS), "short");
    }

    #[test]
    fn prompt_embeds_count_difficulty_and_excerpt() {
        let prompt = build_prompt("The sun is a star.", 5, Difficulty::Hard);
        assert!(prompt.contains("exactly 5 multiple-choice"));
        assert!(prompt.contains("Difficulty Level: Hard"));
        assert!(prompt.contains("The sun is a star."));
        assert!(prompt.contains("\"question\""));
    }
}
