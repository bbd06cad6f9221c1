use quizforge::parse_quiz;
use quizforge::quiz::{Difficulty, Question};
use quizforge::report::{render_csv, render_json, render_summary_pdf};
use quizforge::session::QuizSession;

fn question(text: &str, options: [&str; 4], answer: &str) -> Question {
    Question {
        text: text.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_answer: answer.to_string(),
    }
}

fn sample_quiz() -> Vec<Question> {
    vec![
        question(
            "What is the sun?",
            ["A star", "A planet", "A moon", "A comet"],
            "A star",
        ),
        question(
            "Which planet is hot, rocky, and second from the sun?",
            ["Mars", "Venus", "Mercury", "Pluto"],
            "Venus",
        ),
    ]
}

/// Answer every question (first option) and advance to completion.
fn completed_session(quiz: Vec<Question>) -> QuizSession {
    let mut session = QuizSession::new();
    let choices: Vec<String> = quiz.iter().map(|q| q.options[0].clone()).collect();
    session
        .load_quiz(quiz, "source".to_string(), 5, Difficulty::Medium)
        .unwrap();
    for choice in choices {
        session.submit(&choice).unwrap();
        session.advance().unwrap();
    }
    session
}

#[test]
fn json_export_round_trips_through_the_parser() {
    let quiz = sample_quiz();
    let json = render_json(&quiz).unwrap();
    let reparsed = parse_quiz(&json).unwrap();
    assert_eq!(reparsed, quiz);
}

#[test]
fn json_export_uses_the_wire_field_names() {
    let json = render_json(&sample_quiz()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert!(first.get("question").is_some());
    assert!(first.get("options").is_some());
    assert!(first.get("answer").is_some());
    assert!(first.get("correct_answer").is_none());
}

#[test]
fn csv_has_header_and_one_row_per_question() {
    let csv = render_csv(&sample_quiz()).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Question,Option A,Option B,Option C,Option D,Answer"
    );
    assert_eq!(lines.clone().count(), 2);
    let first = lines.next().unwrap();
    assert!(first.starts_with("What is the sun?,A star,"));
    assert!(first.ends_with(",A star"));
}

#[test]
fn csv_quotes_fields_with_embedded_separators() {
    let quiz = vec![question(
        "Hot, rocky, or both?",
        ["Hot", "Rocky", "Both, actually", "Neither"],
        "Both, actually",
    )];
    let csv = render_csv(&quiz).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert!(row.contains("\"Hot, rocky, or both?\""));
    assert!(row.contains("\"Both, actually\""));

    // The quoting survives a CSV reader round trip.
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(&record[0], "Hot, rocky, or both?");
    assert_eq!(&record[5], "Both, actually");
}

#[test]
fn csv_emits_empty_cells_for_missing_options() {
    let mut short = question("Q", ["w", "x", "y", "z"], "w");
    short.options.truncate(2);
    let csv = render_csv(&vec![short]).unwrap();
    assert!(csv.lines().nth(1).unwrap().contains("w,x,,,"));
}

#[test]
fn summary_pdf_renders_a_parseable_document() {
    let session = completed_session(sample_quiz());
    let bytes = render_summary_pdf(&session).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn summary_pdf_paginates_long_quizzes() {
    let quiz: Vec<Question> = (0..40)
        .map(|i| {
            question(
                &format!("Question number {i}?"),
                ["w", "x", "y", "z"],
                "w",
            )
        })
        .collect();
    let session = completed_session(quiz);
    let bytes = render_summary_pdf(&session).unwrap();

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert!(doc.get_pages().len() >= 2);
}

#[test]
fn summary_pdf_requires_a_loaded_quiz() {
    let session = QuizSession::new();
    assert!(render_summary_pdf(&session).is_err());
}
