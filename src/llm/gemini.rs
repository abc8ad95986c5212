use crate::llm::client::LLMClient;
use crate::types::{AppError, Result};
use crate::utils::config::RetryOptions;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

/// Default Gemini REST API base.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini client for API-based inference.
///
/// Applies the configured retry policy to retryable HTTP statuses; retry
/// exhaustion surfaces as [`AppError::Llm`].
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    retry: RetryOptions,
}

impl GeminiClient {
    /// Create a client against the public Gemini API.
    pub fn new(api_key: String, model: String, retry: RetryOptions) -> Self {
        Self::with_api_base(DEFAULT_API_BASE.to_string(), api_key, model, retry)
    }

    /// Create a client against a custom API base (used by tests).
    pub fn with_api_base(
        api_base: String,
        api_key: String,
        model: String,
        retry: RetryOptions,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base,
            api_key,
            model,
            retry,
        }
    }

    async fn request(&self, body: Value) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);
        let mut attempt = 0u32;

        loop {
            let response = self
                .http
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| AppError::Llm(format!("Gemini transport error: {}", e)))?;

            let status = response.status();
            if status.is_success() {
                let parsed: GenerateContentResponse = response
                    .json()
                    .await
                    .map_err(|e| AppError::Llm(format!("Gemini response decode error: {}", e)))?;
                return parsed.first_text().ok_or_else(|| {
                    AppError::Llm("Gemini response contained no text candidates".to_string())
                });
            }

            let code = status.as_u16();
            if self.retry.should_retry(code) && attempt + 1 < self.retry.attempts {
                let delay = self.retry.delay_for(attempt);
                tracing::warn!(
                    status = code,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retryable Gemini status, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(AppError::Llm(format!("Gemini API error: status {}", code)));
        }
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        });
        self.request(body).await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": system }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        });
        self.request(body).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
