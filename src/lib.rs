pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod parser;
pub mod quiz;
pub mod report;
pub mod session;

// Convenient re-exports
pub use generator::{GeneratorConfig, QuizGenerator};
pub use parser::parse_quiz;
pub use quiz::{Difficulty, Question, QuizSet};
pub use session::{QuizSession, SessionPhase};
