//! Tool type definitions for Livestorm function-calling.
//!
//! Provides provider-agnostic types for tool definitions, calls, and
//! results. The declared descriptions carry the hard usage constraints —
//! single call, no manual pagination — so the policy lives in the tool
//! contract surfaced to the reasoning layer, not in executor state.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// A tool definition that can be sent to an LLM for function-calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the dispatch table in the executor).
    pub name: String,
    /// Human-readable description, including usage constraints.
    pub description: String,
    /// JSON Schema object describing the tool's parameters.
    pub parameters: serde_json::Value,
}

/// A tool call requested by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this call (assigned by the provider).
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON-encoded arguments for the tool.
    pub arguments: String,
}

/// The result of executing a tool call.
///
/// `content` is always text: tool summaries and `"Error: …"` strings are
/// both ordinary results. `is_error` marks dispatch failures (unknown
/// tool, unparseable arguments), not API errors the tool already
/// flattened into text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this result corresponds to.
    pub tool_call_id: String,
    /// Result content.
    pub content: String,
    /// Whether this result represents a dispatch error.
    pub is_error: bool,
}

/// The set of tool definitions offered to the model.
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    definitions: Vec<ToolDefinition>,
}

impl ToolSet {
    /// Returns the tool definitions in this set.
    #[must_use]
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Returns `true` if this set contains no tools.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Returns the number of tools in this set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.definitions.len()
    }

    /// The full Livestorm tool set: `list_events` and
    /// `get_event_analytics`.
    #[must_use]
    pub fn livestorm_tools() -> Self {
        Self {
            definitions: vec![def_list_events(), def_event_analytics()],
        }
    }

    /// Empty tool set (no tools available).
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Tool schema definitions
// ---------------------------------------------------------------------------

/// Defines the `list_events` tool.
fn def_list_events() -> ToolDefinition {
    ToolDefinition {
        name: "list_events".to_string(),
        description: "List all events from Livestorm. This tool ALWAYS fetches ALL events \
                       across ALL pages, regardless of any page_number input. Do NOT try to \
                       paginate or call this tool in a loop. Call it ONCE and it will return \
                       a summary of all events. If you want to filter, use the filter \
                       parameters. If you want all events, just call it with no filters. \
                       Never try to increment page numbers yourself!"
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "filter_title": {
                    "type": "string",
                    "description": "Filter events by title."
                },
                "filter_scheduling_status": {
                    "type": "string",
                    "description": "Filter by scheduling status (upcoming, live, ended, on_demand, draft)."
                },
                "filter_created_since": {
                    "type": "string",
                    "description": "Only events created at or after this ISO-8601 timestamp."
                },
                "filter_created_until": {
                    "type": "string",
                    "description": "Only events created at or before this ISO-8601 timestamp."
                },
                "filter_updated_since": {
                    "type": "string",
                    "description": "Only events updated at or after this ISO-8601 timestamp."
                },
                "filter_updated_until": {
                    "type": "string",
                    "description": "Only events updated at or before this ISO-8601 timestamp."
                },
                "include_sessions": {
                    "type": "boolean",
                    "description": "Include related session data."
                },
                "page_number": {
                    "type": "string",
                    "description": "Ignored. The tool always fetches every page."
                }
            },
            "additionalProperties": false
        }),
    }
}

/// Defines the `get_event_analytics` tool.
fn def_event_analytics() -> ToolDefinition {
    ToolDefinition {
        name: "get_event_analytics".to_string(),
        description: "Get comprehensive analytics for all Livestorm events. Returns detailed \
                       statistics including: total number of events, number of ended events, \
                       total number of sessions across all events, complete event status \
                       categorization with percentages, and key metrics and ratios. This tool \
                       fetches ALL events and provides complete analytics in one call."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "include_sessions": {
                    "type": "boolean",
                    "description": "Whether to include session data in the analysis.",
                    "default": true
                }
            },
            "additionalProperties": false
        }),
    }
}
