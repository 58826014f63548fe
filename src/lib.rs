//! stormline: a conversational front-end for the Livestorm events API.
//!
//! Users ask about their events in natural language; an LLM (any
//! OpenAI-compatible completion service, Groq by default) decides whether
//! to invoke one of the Livestorm query tools, and the reply is streamed
//! back incrementally.
//!
//! # Architecture
//!
//! ```text
//! user question → agent::Orchestrator
//!   ├── (optional) tool call → livestorm::{EventsClient, AnalyticsClient}
//!   │     └── livestorm::ApiClient → aggregate_pages (all pages, merged)
//!   └── agent::stream_chat → text fragments → display surface
//! ```
//!
//! Everything the display layer receives is text: API failures, streaming
//! failures, and tool errors are flattened into `"Error: …"` strings at
//! the layer boundaries. See the module docs for the individual
//! contracts.

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod livestorm;

pub use config::Config;
pub use error::{AgentError, ApiError};
