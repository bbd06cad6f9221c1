pub mod gemini;
pub mod mock;

pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::{MockClient, MockHandle, MockVoid};

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::AIError;

/// Low-level completion client abstraction.
///
/// Implementors provide `complete`, which executes a prompt against the
/// hosted model and returns the raw response text. Everything above this seam
/// (prompt assembly, parsing, timeouts) lives in the generator.
#[async_trait]
pub trait CompletionClient: Send + Sync + Debug {
    /// Execute one prompt and return the raw model text.
    async fn complete(&self, prompt: String) -> Result<String, AIError>;

    /// Clone this client into a boxed trait object.
    fn clone_box(&self) -> Box<dyn CompletionClient>;
}

impl Clone for Box<dyn CompletionClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[async_trait]
impl CompletionClient for Box<dyn CompletionClient> {
    async fn complete(&self, prompt: String) -> Result<String, AIError> {
        self.as_ref().complete(prompt).await
    }

    fn clone_box(&self) -> Box<dyn CompletionClient> {
        self.as_ref().clone_box()
    }
}
