use std::time::Duration;

use async_trait::async_trait;

use quizforge::clients::{CompletionClient, MockClient};
use quizforge::error::{AIError, GenerateError, ParseError};
use quizforge::generator::{GeneratorConfig, QuizGenerator};
use quizforge::quiz::Difficulty;
use quizforge::session::{QuizSession, SessionPhase};

const SUN_RESPONSE: &str = "```json\n[{\"question\":\"What is the sun?\",\"options\":[\"A star\",\"A planet\",\"A moon\",\"A comet\"],\"answer\":\"A star\"}]\n```";

#[tokio::test]
async fn generate_parses_a_fenced_mock_response() {
    let (client, _handle) = MockClient::with_responses([SUN_RESPONSE]);
    let generator = QuizGenerator::new(client);

    let quiz = generator
        .generate("The sun is a star. It is hot.", 1, Difficulty::Medium)
        .await
        .unwrap();

    assert_eq!(quiz.len(), 1);
    assert_eq!(quiz[0].text, "What is the sun?");
    assert_eq!(quiz[0].correct_answer, "A star");
}

#[tokio::test]
async fn full_run_scores_a_loose_answer() {
    let (client, _handle) = MockClient::with_responses([SUN_RESPONSE]);
    let generator = QuizGenerator::new(client);
    let mut session = QuizSession::new();

    let source = "The sun is a star. It is hot.".to_string();
    let quiz = generator
        .generate(&source, 1, Difficulty::Medium)
        .await
        .unwrap();
    session
        .load_quiz(quiz, source, 1, Difficulty::Medium)
        .unwrap();

    // Trailing space and different case still count.
    let outcome = session.submit("a star ").unwrap();
    assert!(outcome.correct);
    assert!(session.current_answered());
    assert_eq!(session.score(), 1);

    assert_eq!(session.advance().unwrap(), SessionPhase::Complete);
}

#[tokio::test]
async fn malformed_response_leaves_the_session_untouched() {
    let (client, _handle) = MockClient::with_responses(["not json at all"]);
    let generator = QuizGenerator::new(client);
    let session = QuizSession::new();

    let err = generator
        .generate("source", 5, Difficulty::Medium)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Parse(ParseError::MalformedJson(_, _))
    ));

    assert_eq!(session.phase(), SessionPhase::Uninitialized);
    assert!(session.quiz().is_none());
}

#[tokio::test]
async fn upstream_failure_is_surfaced_as_ai_error() {
    let (client, handle) = MockClient::new();
    handle.push_error("service unavailable");
    let generator = QuizGenerator::new(client);

    let err = generator
        .generate("source", 5, Difficulty::Medium)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::Ai(AIError::Mock(_))));
}

#[tokio::test]
async fn regeneration_reuses_the_stored_request() {
    let second_quiz = "[{\"question\":\"Is the sun hot?\",\"options\":[\"Yes\",\"No\",\"Sometimes\",\"Unknown\"],\"answer\":\"Yes\"}]";
    let (client, _handle) = MockClient::with_responses([SUN_RESPONSE, second_quiz]);
    let generator = QuizGenerator::new(client);
    let mut session = QuizSession::new();

    let source = "The sun is a star. It is hot.".to_string();
    let quiz = generator
        .generate(&source, 1, Difficulty::Hard)
        .await
        .unwrap();
    session
        .load_quiz(quiz, source, 1, Difficulty::Hard)
        .unwrap();
    session.submit("A planet").unwrap();
    session.advance().unwrap();
    assert_eq!(session.phase(), SessionPhase::Complete);

    // Regenerate with the stored source/count/difficulty.
    let stored_source = session.source_text().to_string();
    let quiz = generator
        .generate(
            &stored_source,
            session.requested_count(),
            session.requested_difficulty(),
        )
        .await
        .unwrap();
    session
        .load_quiz(
            quiz,
            stored_source,
            session.requested_count(),
            session.requested_difficulty(),
        )
        .unwrap();

    assert_eq!(session.phase(), SessionPhase::InProgress);
    assert_eq!(session.score(), 0);
    assert_eq!(session.recorded_answer(0), None);
    assert_eq!(
        session.current_question().unwrap().1.text,
        "Is the sun hot?"
    );
}

/// Client that never answers inside the configured timeout.
#[derive(Debug, Clone)]
struct StalledClient;

#[async_trait]
impl CompletionClient for StalledClient {
    async fn complete(&self, _prompt: String) -> Result<String, AIError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(String::new())
    }

    fn clone_box(&self) -> Box<dyn CompletionClient> {
        Box::new(self.clone())
    }
}

#[tokio::test]
async fn generate_times_out_against_a_stalled_upstream() {
    let generator = QuizGenerator::new(StalledClient).with_config(GeneratorConfig {
        request_timeout: Duration::from_millis(20),
    });

    let err = generator
        .generate("source", 5, Difficulty::Medium)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::Ai(AIError::Timeout { .. })));
}
