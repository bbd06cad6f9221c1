use crate::error::ExportError;
use crate::quiz::{QuizSet, OPTIONS_PER_QUESTION};

const HEADER: [&str; 6] = [
    "Question", "Option A", "Option B", "Option C", "Option D", "Answer",
];

/// Render the quiz as CSV, one row per question, options by stored position.
/// The csv writer's quoting rules handle embedded separators. A short option
/// list (impossible post-parser, but the function stays total) is emitted as
/// empty cells.
pub fn render_csv(quiz: &QuizSet) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for question in quiz {
        let mut record: Vec<&str> = Vec::with_capacity(HEADER.len());
        record.push(&question.text);
        for i in 0..OPTIONS_PER_QUESTION {
            record.push(question.options.get(i).map(String::as_str).unwrap_or(""));
        }
        record.push(&question.correct_answer);
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
