//! Orchestrator for the chat agent.
//!
//! Coordinates one user turn end to end: the bounded tool phase against
//! the Livestorm clients, then the final reply through the streaming
//! completion surface. Every turn is independent — no state is shared
//! across calls beyond the configuration.

use std::sync::Arc;

use futures_util::{StreamExt, future, stream};
use tracing::debug;

use crate::config::Config;
use crate::error::AgentError;
use crate::livestorm::ApiClient;

use super::client::create_provider;
use super::executor::ToolExecutor;
use super::message::{ChatMessage, ChatRequest, Role, system_message};
use super::prompt::SYSTEM_PROMPT;
use super::provider::LlmProvider;
use super::streaming::{TextStream, stream_chat};
use super::tool::ToolSet;
use super::tool_loop::{ToolPhaseOutcome, run_tool_phase};

/// Orchestrates user turns: tool phase, then streamed reply.
///
/// The display layer always receives text — provider failures are
/// flattened into an apology string rather than surfaced as errors.
pub struct Orchestrator {
    provider: Arc<dyn LlmProvider>,
    executor: ToolExecutor,
    config: Config,
}

impl Orchestrator {
    /// Creates an orchestrator with an explicit provider and executor.
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, executor: ToolExecutor, config: Config) -> Self {
        Self {
            provider,
            executor,
            config,
        }
    }

    /// Builds an orchestrator from configuration: provider from the
    /// registry, tool executor over a fresh Livestorm client.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] for unsupported providers or an HTTP client
    /// that cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        let provider: Arc<dyn LlmProvider> = Arc::from(create_provider(config)?);
        let api = ApiClient::new(
            &config.livestorm_base_url,
            &config.livestorm_api_key,
            config.request_timeout,
        )
        .map_err(|e| AgentError::Orchestration {
            message: e.to_string(),
        })?;
        Ok(Self::new(provider, ToolExecutor::new(api), config.clone()))
    }

    /// Builds the chat request for one turn: system prompt, then the
    /// caller's history unmodified.
    fn build_request(&self, history: &[ChatMessage], tools: &ToolSet) -> ChatRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(system_message(SYSTEM_PROMPT));
        messages.extend_from_slice(history);

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
            top_p: Some(self.config.top_p),
            stop: self.config.stop.clone(),
            stream: false,
            tools: tools.definitions().to_vec(),
        }
    }

    /// Responds to the conversation with a stream of text fragments.
    ///
    /// Runs the tool phase first (non-streaming), then issues the final
    /// turn through the streaming completion client with tools withheld,
    /// so tool summaries flow back to the display surface incrementally.
    /// When the model answers directly without tools, its already-complete
    /// text is yielded as a single fragment.
    ///
    /// Always yields text: failures become one apology fragment.
    pub async fn respond_stream(&self, history: &[ChatMessage]) -> TextStream {
        if !history.iter().any(|m| m.role == Role::User) {
            return once_text("Error: conversation history contains no user message");
        }

        let mut request = self.build_request(history, &ToolSet::livestorm_tools());

        match run_tool_phase(
            self.provider.as_ref(),
            &mut request,
            &self.executor,
            self.config.max_tool_rounds,
        )
        .await
        {
            Ok(ToolPhaseOutcome::Answered(response)) => {
                debug!("direct answer, no tool round");
                once_text(response.content)
            }
            Ok(ToolPhaseOutcome::ToolsDone) => {
                // Final turn: no tools, so the model must answer in text.
                request.tools.clear();
                stream_chat(self.provider.as_ref(), &request).await
            }
            Err(e) => once_text(apology(&e)),
        }
    }

    /// Asks a single question and returns the full reply as one string.
    ///
    /// Convenience over [`Orchestrator::respond_stream`] for one-shot
    /// callers; never fails, per the same always-text contract.
    pub async fn ask(&self, question: &str) -> String {
        let history = vec![super::message::user_message(question)];
        let reply: Vec<String> = self.respond_stream(&history).await.collect().await;
        reply.concat()
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}

/// Wraps a single fragment as a text stream.
fn once_text(fragment: impl Into<String>) -> TextStream {
    Box::pin(stream::once(future::ready(fragment.into())))
}

/// The apology string shown when a turn fails outright.
fn apology(e: &AgentError) -> String {
    format!(
        "I encountered an error while processing your request: {e}. \
         Please try rephrasing your question."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::message::{ChatResponse, TokenUsage, user_message};
    use crate::agent::provider::FragmentStream;
    use crate::agent::tool::ToolCall;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Provider that requests a tool on the first chat call and streams a
    /// scripted reply on the final turn. Records the streaming request
    /// for assertions.
    struct ToolThenStreamProvider {
        chat_calls: AtomicUsize,
        stream_request: Mutex<Option<ChatRequest>>,
    }

    impl ToolThenStreamProvider {
        fn new() -> Self {
            Self {
                chat_calls: AtomicUsize::new(0),
                stream_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ToolThenStreamProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            self.chat_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ChatResponse {
                content: String::new(),
                usage: TokenUsage::default(),
                tool_calls: vec![ToolCall {
                    id: "call_0".to_string(),
                    name: "list_events".to_string(),
                    arguments: "{}".to_string(),
                }],
                finish_reason: Some("tool_calls".to_string()),
            })
        }

        async fn chat_stream(&self, request: &ChatRequest) -> Result<FragmentStream, AgentError> {
            if let Ok(mut guard) = self.stream_request.lock() {
                *guard = Some(request.clone());
            }
            Ok(Box::pin(stream::iter(vec![
                Ok("You have ".to_string()),
                Ok("1 event.".to_string()),
            ])))
        }
    }

    /// Provider that answers immediately in text.
    struct DirectProvider;

    #[async_trait]
    impl LlmProvider for DirectProvider {
        fn name(&self) -> &'static str {
            "direct"
        }

        async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            Ok(ChatResponse {
                content: "Hello! Ask me about your events.".to_string(),
                usage: TokenUsage::default(),
                tool_calls: Vec::new(),
                finish_reason: Some("stop".to_string()),
            })
        }

        async fn chat_stream(&self, _request: &ChatRequest) -> Result<FragmentStream, AgentError> {
            Err(AgentError::Stream {
                message: "must not stream a direct answer".to_string(),
            })
        }
    }

    /// Provider whose every call fails.
    struct FailingProvider;

    #[async_trait]
    impl LlmProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            Err(AgentError::ApiRequest {
                message: "service unavailable".to_string(),
                status: Some(503),
            })
        }

        async fn chat_stream(&self, _request: &ChatRequest) -> Result<FragmentStream, AgentError> {
            Err(AgentError::Stream {
                message: "service unavailable".to_string(),
            })
        }
    }

    fn config() -> Config {
        Config::builder()
            .completion_api_key("gk")
            .livestorm_api_key("lk")
            .build()
            .unwrap_or_else(|_| unreachable!())
    }

    fn executor(base_url: &str) -> ToolExecutor {
        let api = ApiClient::new(base_url, "key", Duration::from_secs(5))
            .unwrap_or_else(|e| unreachable!("client build failed: {e}"));
        ToolExecutor::new(api)
    }

    async fn mock_events_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "a", "attributes": {"title": "T", "scheduling_status": "live"}}],
                "meta": {"current_page": 1, "page_count": 1}
            })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_tool_turn_streams_final_reply() {
        let server = mock_events_server().await;
        let provider = Arc::new(ToolThenStreamProvider::new());
        let orchestrator = Orchestrator::new(
            Arc::clone(&provider) as Arc<dyn LlmProvider>,
            executor(&server.uri()),
            config(),
        );

        let history = vec![user_message("What events do we have?")];
        let fragments: Vec<String> = orchestrator.respond_stream(&history).await.collect().await;
        assert_eq!(fragments, ["You have ", "1 event."]);

        // The sentinel ended the tool phase after one model call, and the
        // final streamed turn carried the tool result but no tools.
        assert_eq!(provider.chat_calls.load(Ordering::SeqCst), 1);
        let streamed = provider
            .stream_request
            .lock()
            .map(|g| g.clone())
            .unwrap_or_else(|_| unreachable!());
        let streamed = streamed.unwrap_or_else(|| unreachable!("stream never opened"));
        assert!(streamed.tools.is_empty());
        assert!(
            streamed
                .messages
                .iter()
                .any(|m| m.role == Role::Tool && m.content.starts_with("FINAL ANSWER:"))
        );
    }

    #[tokio::test]
    async fn test_direct_answer_single_fragment() {
        let orchestrator = Orchestrator::new(
            Arc::new(DirectProvider),
            executor("http://127.0.0.1:1"),
            config(),
        );
        let reply = orchestrator.ask("hello").await;
        assert_eq!(reply, "Hello! Ask me about your events.");
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_apology_text() {
        let orchestrator = Orchestrator::new(
            Arc::new(FailingProvider),
            executor("http://127.0.0.1:1"),
            config(),
        );
        let reply = orchestrator.ask("hello").await;
        assert!(reply.starts_with("I encountered an error"));
        assert!(reply.contains("service unavailable"));
        assert!(reply.ends_with("Please try rephrasing your question."));
    }

    #[tokio::test]
    async fn test_history_without_user_message_is_error_text() {
        let orchestrator = Orchestrator::new(
            Arc::new(DirectProvider),
            executor("http://127.0.0.1:1"),
            config(),
        );
        let fragments: Vec<String> = orchestrator.respond_stream(&[]).await.collect().await;
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].starts_with("Error: "));
    }

    #[test]
    fn test_from_config_unknown_provider() {
        let config = Config::builder()
            .completion_api_key("gk")
            .livestorm_api_key("lk")
            .provider("acme")
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert!(matches!(
            Orchestrator::from_config(&config),
            Err(AgentError::UnsupportedProvider { .. })
        ));
    }
}
