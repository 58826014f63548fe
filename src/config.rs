//! Configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment
//! variables → defaults. Both service credentials live here so components
//! receive them through constructors instead of reading the process
//! environment themselves.

use std::time::Duration;

use crate::error::AgentError;

/// Default completion model (Groq-hosted Llama).
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
/// Default completion service base URL (Groq's OpenAI-compatible endpoint).
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// Default Livestorm API base URL.
pub const DEFAULT_LIVESTORM_BASE_URL: &str = "https://api.livestorm.co/v1";
/// Default sampling temperature.
const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default maximum completion tokens.
const DEFAULT_MAX_TOKENS: u32 = 1024;
/// Default nucleus sampling parameter.
const DEFAULT_TOP_P: f32 = 1.0;
/// Default model ↔ tool round budget. One tool round plus the final
/// streamed answer; the real single-call policy lives in the tool
/// descriptions, this is only a safety limit.
const DEFAULT_MAX_TOOL_ROUNDS: usize = 2;
/// Default per-request timeout in seconds (bounds each single HTTP call,
/// not a whole aggregation or stream).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the chat agent and both backing services.
#[derive(Debug, Clone)]
pub struct Config {
    /// Completion provider name (e.g., "openai", "groq").
    pub provider: String,
    /// API key for the completion service.
    pub completion_api_key: String,
    /// Base URL for the completion service.
    pub completion_base_url: String,
    /// Completion model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate per completion.
    pub max_tokens: u32,
    /// Nucleus sampling parameter.
    pub top_p: f32,
    /// Optional stop sequence forwarded to the completion service.
    pub stop: Option<String>,
    /// Maximum model ↔ tool round-trips per user turn.
    pub max_tool_rounds: usize,
    /// API key for the Livestorm events platform, forwarded verbatim.
    pub livestorm_api_key: String,
    /// Base URL for the Livestorm API.
    pub livestorm_base_url: String,
    /// Timeout applied to each single HTTP request.
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new builder for `Config`.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if either service key is
    /// absent.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::builder().from_env().build()
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    provider: Option<String>,
    completion_api_key: Option<String>,
    completion_base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    top_p: Option<f32>,
    stop: Option<String>,
    max_tool_rounds: Option<usize>,
    livestorm_api_key: Option<String>,
    livestorm_base_url: Option<String>,
    request_timeout: Option<Duration>,
}

impl ConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.provider.is_none() {
            self.provider = std::env::var("STORMLINE_PROVIDER").ok();
        }
        if self.completion_api_key.is_none() {
            self.completion_api_key = std::env::var("GROQ_API_KEY")
                .or_else(|_| std::env::var("API_KEY"))
                .ok();
        }
        if self.completion_base_url.is_none() {
            self.completion_base_url = std::env::var("GROQ_BASE_URL")
                .or_else(|_| std::env::var("OPENAI_BASE_URL"))
                .ok();
        }
        if self.model.is_none() {
            self.model = std::env::var("STORMLINE_MODEL").ok();
        }
        if self.livestorm_api_key.is_none() {
            self.livestorm_api_key = std::env::var("LIVESTORM_API_KEY")
                .or_else(|_| std::env::var("LS_API_KEY"))
                .ok();
        }
        if self.livestorm_base_url.is_none() {
            self.livestorm_base_url = std::env::var("LIVESTORM_BASE_URL").ok();
        }
        self
    }

    /// Sets the completion provider name.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the completion service API key.
    #[must_use]
    pub fn completion_api_key(mut self, key: impl Into<String>) -> Self {
        self.completion_api_key = Some(key.into());
        self
    }

    /// Sets the completion service base URL.
    #[must_use]
    pub fn completion_base_url(mut self, url: impl Into<String>) -> Self {
        self.completion_base_url = Some(url.into());
        self
    }

    /// Sets the completion model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }

    /// Sets the maximum completion tokens.
    #[must_use]
    pub const fn max_tokens(mut self, n: u32) -> Self {
        self.max_tokens = Some(n);
        self
    }

    /// Sets the nucleus sampling parameter.
    #[must_use]
    pub const fn top_p(mut self, p: f32) -> Self {
        self.top_p = Some(p);
        self
    }

    /// Sets the stop sequence.
    #[must_use]
    pub fn stop(mut self, stop: impl Into<String>) -> Self {
        self.stop = Some(stop.into());
        self
    }

    /// Sets the maximum model ↔ tool round-trips per turn.
    #[must_use]
    pub const fn max_tool_rounds(mut self, n: usize) -> Self {
        self.max_tool_rounds = Some(n);
        self
    }

    /// Sets the Livestorm API key.
    #[must_use]
    pub fn livestorm_api_key(mut self, key: impl Into<String>) -> Self {
        self.livestorm_api_key = Some(key.into());
        self
    }

    /// Sets the Livestorm API base URL.
    #[must_use]
    pub fn livestorm_base_url(mut self, url: impl Into<String>) -> Self {
        self.livestorm_base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if either service key is
    /// absent after explicit values and environment resolution.
    pub fn build(self) -> Result<Config, AgentError> {
        let completion_api_key = self.completion_api_key.ok_or(AgentError::ApiKeyMissing {
            service: "completion",
        })?;
        let livestorm_api_key = self.livestorm_api_key.ok_or(AgentError::ApiKeyMissing {
            service: "livestorm",
        })?;

        Ok(Config {
            provider: self.provider.unwrap_or_else(|| "openai".to_string()),
            completion_api_key,
            completion_base_url: self
                .completion_base_url
                .unwrap_or_else(|| DEFAULT_COMPLETION_BASE_URL.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            top_p: self.top_p.unwrap_or(DEFAULT_TOP_P),
            stop: self.stop,
            max_tool_rounds: self.max_tool_rounds.unwrap_or(DEFAULT_MAX_TOOL_ROUNDS),
            livestorm_api_key,
            livestorm_base_url: self
                .livestorm_base_url
                .unwrap_or_else(|| DEFAULT_LIVESTORM_BASE_URL.to_string()),
            request_timeout: self
                .request_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        })
    }
}
