use crate::error::ExportError;
use crate::quiz::QuizSet;

/// Serialize the quiz as a pretty-printed array of
/// `{question, options, answer}` objects. Output parses back through the
/// quiz parser's array branch unchanged.
pub fn render_json(quiz: &QuizSet) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(quiz)?)
}
