//! Tool executor that dispatches tool calls to the Livestorm clients.
//!
//! Maps tool names to direct calls against [`EventsClient`] and
//! [`AnalyticsClient`]. Each dispatch performs real HTTP against the
//! events platform, so execution is async; there is no shared mutable
//! state and every call is independent.

use tracing::debug;

use crate::error::AgentError;
use crate::livestorm::{AnalyticsArgs, AnalyticsClient, ApiClient, EventsClient, ListEventsFilters};

use super::tool::{ToolCall, ToolResult};

/// Maximum raw byte length of tool argument JSON from the LLM.
const MAX_TOOL_ARGS_LEN: usize = 10_000;

/// Executes tool calls by dispatching to the Livestorm query clients.
///
/// Tool summaries — including their `"Error: …"` strings — are ordinary
/// results: the reasoning loop only consumes text, so API failures are
/// already flattened inside the tools. `is_error` is reserved for
/// dispatch failures (unknown tool, unparseable arguments).
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    events: EventsClient,
    analytics: AnalyticsClient,
}

impl ToolExecutor {
    /// Creates an executor whose tools share the given API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            events: EventsClient::new(api.clone()),
            analytics: AnalyticsClient::new(api),
        }
    }

    /// Dispatches a tool call to the appropriate client.
    ///
    /// Validates raw argument size before dispatch to prevent oversized
    /// payloads.
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        if call.arguments.len() > MAX_TOOL_ARGS_LEN {
            return ToolResult {
                tool_call_id: call.id.clone(),
                content: format!(
                    "tool arguments too large ({} bytes, max {MAX_TOOL_ARGS_LEN})",
                    call.arguments.len()
                ),
                is_error: true,
            };
        }

        debug!(tool = call.name, call_id = call.id, "dispatching tool call");

        let result = match call.name.as_str() {
            "list_events" => self.tool_list_events(&call.arguments).await,
            "get_event_analytics" => self.tool_event_analytics(&call.arguments).await,
            other => Err(AgentError::ToolExecution {
                name: other.to_string(),
                message: "unknown tool".to_string(),
            }),
        };

        match result {
            Ok(content) => ToolResult {
                tool_call_id: call.id.clone(),
                content,
                is_error: false,
            },
            Err(e) => ToolResult {
                tool_call_id: call.id.clone(),
                content: e.to_string(),
                is_error: true,
            },
        }
    }

    // -----------------------------------------------------------------------
    // Tool implementations
    // -----------------------------------------------------------------------

    /// Lists events with the parsed filters. Empty arguments mean no
    /// filters.
    async fn tool_list_events(&self, args: &str) -> Result<String, AgentError> {
        let filters: ListEventsFilters = parse_args("list_events", args)?;
        Ok(self.events.list_events(&filters).await)
    }

    /// Computes comprehensive analytics over all events.
    async fn tool_event_analytics(&self, args: &str) -> Result<String, AgentError> {
        let analytics_args: AnalyticsArgs = parse_args("get_event_analytics", args)?;
        Ok(self.analytics.comprehensive_analytics(&analytics_args).await)
    }
}

/// Parses tool arguments, treating an empty or blank payload as defaults.
fn parse_args<T>(tool: &str, args: &str) -> Result<T, AgentError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let trimmed = args.trim();
    if trimmed.is_empty() || trimmed == "{}" {
        return Ok(T::default());
    }
    serde_json::from_str(trimmed).map_err(|e| AgentError::ToolExecution {
        name: tool.to_string(),
        message: format!("invalid arguments: {e}"),
    })
}
