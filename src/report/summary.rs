//! Paginated PDF summary of a finished quiz run.
//!
//! Coordinates are tracked in points on a US-Letter page with the origin at
//! the bottom-left. The page-break check runs at question-block boundaries,
//! so an unusually long block may overrun the bottom margin before the break
//! lands.

use chrono::Utc;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use tracing::debug;

use crate::error::ExportError;
use crate::quiz::{answers_match, Question, OPTION_LABELS};
use crate::session::QuizSession;

// US Letter, in points.
const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;
const TOP_OFFSET_PT: f32 = 50.0;
const BOTTOM_MARGIN_PT: f32 = 50.0;
const LEFT_MARGIN_PT: f32 = 50.0;
const INDENT_PT: f32 = 70.0;

const PT_TO_MM: f32 = 25.4 / 72.0;

fn mm(pt: f32) -> Mm {
    Mm(pt * PT_TO_MM)
}

/// Render the summary document: title, final score, then per question the
/// labelled options, the user's answer with its verdict, and the correct
/// answer.
pub fn render_summary_pdf(session: &QuizSession) -> Result<Vec<u8>, ExportError> {
    let quiz = session
        .quiz()
        .ok_or_else(|| ExportError::Pdf("no quiz to summarize".to_string()))?;

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Quiz Summary Report",
        mm(PAGE_WIDTH_PT),
        mm(PAGE_HEIGHT_PT),
        "summary",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT_PT - TOP_OFFSET_PT;

    layer.use_text("Quiz Summary Report", 16.0, mm(LEFT_MARGIN_PT), mm(y), &bold);
    y -= 18.0;
    layer.use_text(
        format!("Generated: {}", Utc::now().format("%Y-%m-%d %H:%M UTC")),
        9.0,
        mm(LEFT_MARGIN_PT),
        mm(y),
        &regular,
    );
    y -= 22.0;
    layer.use_text(
        format!("Final Score: {}/{}", session.score(), quiz.len()),
        12.0,
        mm(LEFT_MARGIN_PT),
        mm(y),
        &bold,
    );
    y -= 30.0;

    for (i, question) in quiz.iter().enumerate() {
        let user_answer = session.recorded_answer(i).unwrap_or("Not answered");
        write_question_block(&layer, &regular, &bold, i, question, user_answer, &mut y);

        // Page breaks land between blocks only.
        if y < BOTTOM_MARGIN_PT {
            let (page, page_layer) = doc.add_page(mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), "summary");
            layer = doc.get_page(page).get_layer(page_layer);
            y = PAGE_HEIGHT_PT - TOP_OFFSET_PT;
        }
    }

    debug!(questions = quiz.len(), "summary document rendered");
    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}

#[allow(clippy::too_many_arguments)]
fn write_question_block(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    index: usize,
    question: &Question,
    user_answer: &str,
    y: &mut f32,
) {
    layer.use_text(
        format!("Q{}. {}", index + 1, question.text),
        12.0,
        mm(LEFT_MARGIN_PT),
        mm(*y),
        bold,
    );
    *y -= 20.0;

    for (label, option) in OPTION_LABELS.iter().zip(&question.options) {
        layer.use_text(
            format!("{}. {}", label, option),
            12.0,
            mm(INDENT_PT),
            mm(*y),
            regular,
        );
        *y -= 15.0;
    }

    let status = if answers_match(user_answer, &question.correct_answer) {
        "Correct"
    } else {
        "Wrong"
    };
    layer.use_text(
        format!("Your Answer: {} ({})", user_answer, status),
        12.0,
        mm(INDENT_PT),
        mm(*y),
        regular,
    );
    *y -= 15.0;
    layer.use_text(
        format!("Correct Answer: {}", question.correct_answer),
        12.0,
        mm(INDENT_PT),
        mm(*y),
        regular,
    );
    *y -= 25.0;
}
