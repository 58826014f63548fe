//! Chat agent for natural-language Livestorm queries.
//!
//! Wires a pluggable completion provider to the Livestorm query tools and
//! streams replies back to the display surface.
//!
//! # Architecture
//!
//! ```text
//! User message → Orchestrator
//!   ├── tool phase (bounded model ↔ tool round-trip)
//!   │     └── ToolExecutor → EventsClient / AnalyticsClient
//!   └── final turn → stream_chat → incremental text fragments
//! ```
//!
//! The tool phase is non-streaming; the final reply always flows through
//! the streaming surface so the display layer renders fragments as they
//! arrive. Failures never escape as errors — every turn produces text.

pub mod client;
pub mod executor;
pub mod message;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod streaming;
pub mod tool;
pub mod tool_loop;

// Re-export key types
pub use client::create_provider;
pub use executor::ToolExecutor;
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
pub use orchestrator::Orchestrator;
pub use provider::{FragmentStream, LlmProvider};
pub use streaming::{TextStream, stream_chat};
pub use tool::{ToolCall, ToolDefinition, ToolResult, ToolSet};
pub use tool_loop::{ToolPhaseOutcome, run_tool_phase};
