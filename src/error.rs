use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for the binary boundary. Every recoverable error below is
/// reported in place by the presentation layer; only `Config` gates startup.
#[derive(Error, Debug)]
pub enum QuizforgeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("completion API error: {0}")]
    Ai(#[from] AIError),
    #[error("quiz parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("session state error: {0}")]
    State(#[from] StateError),
    #[error("document extraction error: {0}")]
    Extract(#[from] ExtractError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Startup credential problems. Fatal to the session: quiz functionality is
/// blocked with a visible message before any API call is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not set or empty; export it or add it to a .env file")]
    MissingApiKey { var: &'static str },
}

/// Failures talking to the completion service.
#[derive(Error, Debug)]
pub enum AIError {
    #[error("Gemini API error: {0}")]
    Gemini(#[from] GeminiError),
    #[error("mock client error: {0}")]
    Mock(String),
    #[error("completion request timed out after {secs}s")]
    Timeout { secs: u64 },
}

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
}

/// Model output that could not be turned into a quiz. Always recoverable:
/// the user may regenerate.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed JSON: {0}. Raw response: {1}")]
    MalformedJson(#[source] serde_json::Error, String),
    #[error("response shape not recognized as a quiz")]
    UnrecognizedFormat,
    #[error("no questions remained after normalization")]
    EmptyQuiz,
}

/// Illegal session transition. The presentation layer gates these; the state
/// machine still rejects them without corrupting state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("no quiz is loaded")]
    QuizNotLoaded,
    #[error("a quiz is already in progress")]
    QuizInProgress,
    #[error("the quiz is already complete")]
    QuizComplete,
    #[error("the quiz is not complete yet")]
    QuizNotComplete,
    #[error("question {index} was already answered")]
    AlreadyAnswered { index: usize },
    #[error("question {index} has not been answered yet")]
    NotYetAnswered { index: usize },
}

/// Problems reading or extracting text from the input document.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} does not look like a PDF file")]
    NotPdf { path: PathBuf },
    #[error("failed to load PDF structure: {0}")]
    Load(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("no extractable text in {path} (scanned or image-only PDF?)")]
    NoText { path: PathBuf },
}

/// Report rendering and file output failures.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Combined failure mode of one generate attempt: either the upstream call
/// failed or its output did not parse. The session is left unchanged either
/// way.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Ai(#[from] AIError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<GenerateError> for QuizforgeError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Ai(e) => Self::Ai(e),
            GenerateError::Parse(e) => Self::Parse(e),
        }
    }
}
