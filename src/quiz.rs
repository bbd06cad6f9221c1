use std::fmt;

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placeholder substituted for an option the model emitted as a bare answer
/// letter instead of full text. Its presence means the quiz should be
/// regenerated.
pub const MISSING_OPTION: &str = "Option missing - please regenerate quiz";

/// Positional labels shown next to options, in stored order.
pub const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Every question carries exactly this many options after parsing.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One multiple-choice question. The serde names are the wire shape shared by
/// the model prompt, the parser, and the JSON export, so an exported quiz
/// parses back through the same path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    /// The full question text.
    #[serde(rename = "question")]
    pub text: String,
    /// Exactly four full answer choices, order-significant.
    pub options: Vec<String>,
    /// The correct answer, copied from one of the options.
    #[serde(rename = "answer")]
    pub correct_answer: String,
}

/// The ordered collection of generated questions for one quiz instance.
/// Immutable once produced; regeneration replaces it wholesale.
pub type QuizSet = Vec<Question>;

/// Requested difficulty, each level carrying the fixed instruction sentence
/// embedded verbatim in the generation prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Easy => "Focus on direct facts and simple recall.",
            Self::Medium => "Mix of factual and conceptual questions.",
            Self::Hard => "Analytical or higher-order thinking, may require inference.",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

/// Answer comparison used for scoring and summary markers: both sides trimmed
/// and lowercased. An empty side never matches.
pub fn answers_match(submitted: &str, correct: &str) -> bool {
    let submitted = submitted.trim();
    let correct = correct.trim();
    if submitted.is_empty() || correct.is_empty() {
        return false;
    }
    submitted.to_lowercase() == correct.to_lowercase()
}
