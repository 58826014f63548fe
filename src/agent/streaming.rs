//! Streaming chat surface for the display layer.
//!
//! Wraps a provider's fragment stream into an always-text sequence: the
//! display loop only renders strings, so connection and mid-stream
//! failures are flattened into a single `"Error: …"` fragment that ends
//! the stream. Consumption is single-pass and pull-driven; the stream
//! terminates when the upstream signals completion, with no end marker
//! beyond exhaustion.

use std::pin::Pin;

use futures_util::{Stream, StreamExt, future, stream};

use super::message::ChatRequest;
use super::provider::LlmProvider;

/// A lazy sequence of display-ready text fragments.
pub type TextStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Opens a streaming completion and yields text fragments as they arrive.
///
/// The message history in `request` is passed through unmodified. Exactly
/// one upstream connection is opened per call; restarting means calling
/// again. Empty deltas are skipped. Any failure — opening the connection
/// or mid-stream — yields one `"Error: {message}"` fragment and ends the
/// sequence instead of propagating an error past this boundary.
pub async fn stream_chat(provider: &dyn LlmProvider, request: &ChatRequest) -> TextStream {
    let mut request = request.clone();
    request.stream = true;

    let upstream = match provider.chat_stream(&request).await {
        Ok(upstream) => upstream,
        Err(e) => return Box::pin(stream::once(future::ready(format!("Error: {e}")))),
    };

    let flattened = upstream
        .scan(false, |errored, item| {
            if *errored {
                return future::ready(None);
            }
            let fragment = match item {
                Ok(text) => text,
                Err(e) => {
                    *errored = true;
                    format!("Error: {e}")
                }
            };
            future::ready(Some(fragment))
        })
        .filter(|fragment| future::ready(!fragment.is_empty()));

    Box::pin(flattened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::message::{ChatResponse, user_message};
    use crate::agent::provider::FragmentStream;
    use crate::error::AgentError;
    use async_trait::async_trait;

    /// Mock provider that replays a scripted fragment sequence.
    struct ScriptedProvider {
        fragments: Vec<Result<String, AgentError>>,
        fail_open: bool,
    }

    impl ScriptedProvider {
        fn new(fragments: Vec<Result<String, AgentError>>) -> Self {
            Self {
                fragments,
                fail_open: false,
            }
        }

        const fn failing_open() -> Self {
            Self {
                fragments: Vec::new(),
                fail_open: true,
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            Err(AgentError::ApiRequest {
                message: "not used".to_string(),
                status: None,
            })
        }

        async fn chat_stream(&self, request: &ChatRequest) -> Result<FragmentStream, AgentError> {
            assert!(request.stream, "stream_chat must request streaming");
            if self.fail_open {
                return Err(AgentError::Stream {
                    message: "connection refused".to_string(),
                });
            }
            Ok(Box::pin(stream::iter(self.fragments.clone())))
        }
    }

    fn request() -> ChatRequest {
        ChatRequest {
            model: "llama-3.1-8b-instant".to_string(),
            messages: vec![user_message("hi")],
            temperature: Some(0.7),
            max_tokens: Some(1024),
            top_p: Some(1.0),
            stop: None,
            stream: false,
            tools: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_fragments_arrive_in_order() {
        let provider = ScriptedProvider::new(vec![Ok("Hel".to_string()), Ok("lo".to_string())]);
        let fragments: Vec<String> = stream_chat(&provider, &request()).await.collect().await;
        assert_eq!(fragments, ["Hel", "lo"]);
        assert_eq!(fragments.concat(), "Hello");
    }

    #[tokio::test]
    async fn test_empty_deltas_are_skipped() {
        let provider = ScriptedProvider::new(vec![
            Ok(String::new()),
            Ok("Hi".to_string()),
            Ok(String::new()),
        ]);
        let fragments: Vec<String> = stream_chat(&provider, &request()).await.collect().await;
        assert_eq!(fragments, ["Hi"]);
    }

    #[tokio::test]
    async fn test_open_failure_yields_single_error_fragment() {
        let provider = ScriptedProvider::failing_open();
        let fragments: Vec<String> = stream_chat(&provider, &request()).await.collect().await;
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].starts_with("Error: "));
        assert!(fragments[0].contains("connection refused"));
    }

    #[tokio::test]
    async fn test_mid_stream_failure_ends_sequence() {
        let provider = ScriptedProvider::new(vec![
            Ok("partial".to_string()),
            Err(AgentError::Stream {
                message: "reset by peer".to_string(),
            }),
            // Anything after the failure must never surface.
            Ok("ghost".to_string()),
        ]);
        let fragments: Vec<String> = stream_chat(&provider, &request()).await.collect().await;
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], "partial");
        assert!(fragments[1].starts_with("Error: "));
        assert!(!fragments.concat().contains("ghost"));
    }
}
