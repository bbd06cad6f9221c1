use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::clients::CompletionClient;
use crate::error::AIError;

/// Shared handle used by tests to script responses for a [`MockClient`].
#[derive(Debug, Default)]
pub struct MockHandle {
    responses: Mutex<VecDeque<Result<String, String>>>,
}

impl MockHandle {
    /// Queue a successful raw response.
    pub fn push_response(&self, text: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(text.into()));
    }

    /// Queue a failure for the next call.
    pub fn push_error(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
    }
}

/// Mock client that replays scripted responses in FIFO order.
#[derive(Debug, Clone)]
pub struct MockClient {
    handle: Arc<MockHandle>,
}

impl MockClient {
    pub fn new() -> (Self, Arc<MockHandle>) {
        let handle = Arc::new(MockHandle::default());
        (
            Self {
                handle: Arc::clone(&handle),
            },
            handle,
        )
    }

    pub fn with_responses<I, S>(responses: I) -> (Self, Arc<MockHandle>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (client, handle) = Self::new();
        for response in responses {
            handle.push_response(response);
        }
        (client, handle)
    }
}

#[async_trait]
impl CompletionClient for MockClient {
    async fn complete(&self, _prompt: String) -> Result<String, AIError> {
        match self.handle.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(AIError::Mock(message)),
            None => Err(AIError::Mock("mock response queue is empty".to_string())),
        }
    }

    fn clone_box(&self) -> Box<dyn CompletionClient> {
        Box::new(self.clone())
    }
}

/// Mock client for testing that returns empty responses.
#[derive(Debug, Clone, Default)]
pub struct MockVoid;

#[async_trait]
impl CompletionClient for MockVoid {
    async fn complete(&self, _prompt: String) -> Result<String, AIError> {
        Ok("{}".to_string())
    }

    fn clone_box(&self) -> Box<dyn CompletionClient> {
        Box::new(self.clone())
    }
}
