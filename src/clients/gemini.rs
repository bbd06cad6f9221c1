use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::clients::CompletionClient;
use crate::config::KeyFromEnv;
use crate::error::{AIError, GeminiError};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            max_output_tokens: 4096,
            temperature: 0.3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl KeyFromEnv for GeminiClient {
    const KEY_NAME: &'static str = "GOOGLE_API_KEY";
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        info!(model = %config.model, "Creating new Gemini client");
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len(), model = %self.config.model))]
    async fn complete(&self, prompt: String) -> Result<String, AIError> {
        debug!(model = %self.config.model, prompt_len = prompt.len(), "Preparing Gemini API request");

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let url = format!("{}/{}:generateContent", API_BASE, self.config.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                AIError::Gemini(GeminiError::Http(e.to_string()))
            })?;

        debug!(status = %response.status(), "Received response from Gemini API");

        if response.status() == 429 {
            warn!("Gemini API rate limit exceeded");
            return Err(AIError::Gemini(GeminiError::RateLimit));
        }

        if response.status() == 401 || response.status() == 403 {
            error!("Gemini API authentication failed");
            return Err(AIError::Gemini(GeminiError::Authentication));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Gemini API error");
            return Err(AIError::Gemini(GeminiError::Api(error_text)));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response JSON");
            AIError::Gemini(GeminiError::Http(e.to_string()))
        })?;

        debug!(candidate_count = gemini_response.candidates.len(), "Parsed Gemini response");

        let text = gemini_response
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            error!("No content in Gemini response");
            return Err(AIError::Gemini(GeminiError::Api(
                "No content in response".to_string(),
            )));
        }

        info!(response_len = text.len(), "Successfully received Gemini response");
        Ok(text)
    }

    fn clone_box(&self) -> Box<dyn CompletionClient> {
        Box::new(self.clone())
    }
}
