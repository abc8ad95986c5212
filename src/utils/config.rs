use std::env;
use std::time::Duration;

/// Model used for both pipeline stages unless overridden.
pub const DEFAULT_WORKER_MODEL: &str = "gemini-2.5-flash-lite";

/// Environment-driven configuration for the pipeline.
///
/// Model selection and retry attempts are the only knobs; everything else in
/// the pipeline is fixed by design.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model identifier for the worker agents.
    pub worker_model: String,
    /// Maximum transport attempts per model call.
    pub max_attempts: u32,
    /// Gemini API key, if set.
    pub gemini_api_key: Option<String>,
}

impl Config {
    /// Load configuration from the environment (`.env` honored via dotenvy).
    ///
    /// - `INVOXA_MODEL` — worker model, defaults to [`DEFAULT_WORKER_MODEL`]
    /// - `INVOXA_MAX_ATTEMPTS` — transport attempts, defaults to 5
    /// - `GEMINI_API_KEY` — API key for the Gemini provider
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            worker_model: env::var("INVOXA_MODEL")
                .unwrap_or_else(|_| DEFAULT_WORKER_MODEL.to_string()),
            max_attempts: env::var("INVOXA_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
        }
    }

    /// Retry policy derived from this configuration.
    pub fn retry_options(&self) -> RetryOptions {
        RetryOptions {
            attempts: self.max_attempts,
            ..RetryOptions::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_model: DEFAULT_WORKER_MODEL.to_string(),
            max_attempts: 5,
            gemini_api_key: None,
        }
    }
}

/// Retry policy for model transport calls.
///
/// This is configuration handed to the transport layer, not pipeline logic:
/// the pipeline itself never retries.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryOptions {
    /// Total attempts, including the first.
    pub attempts: u32,
    /// Exponential backoff base.
    pub exp_base: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// HTTP status codes worth retrying.
    pub retry_status_codes: Vec<u16>,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            attempts: 5,
            exp_base: 7,
            initial_delay: Duration::from_secs(1),
            retry_status_codes: vec![429, 500, 503, 504],
        }
    }
}

impl RetryOptions {
    /// Whether the given HTTP status warrants a retry.
    pub fn should_retry(&self, status: u16) -> bool {
        self.retry_status_codes.contains(&status)
    }

    /// Backoff delay before the retry following the given zero-based attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay * self.exp_base.saturating_pow(attempt)
    }
}
