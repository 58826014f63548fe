//! Livestorm API subsystem.
//!
//! A thin, normalized client over the Livestorm REST API plus the two
//! query operations the chat agent exposes as tools:
//!
//! ```text
//! Tool call → EventsClient / AnalyticsClient
//!   └── ApiClient (one HTTP call, normalized errors)
//!        └── aggregate_pages (sequential best-effort page merge)
//! → sentinel-prefixed text summary
//! ```
//!
//! All tool outputs are plain text: success summaries start with
//! [`FINAL_ANSWER_PREFIX`], failures with `"Error: "`. The reasoning
//! layer consumes only strings, so structured errors are flattened at
//! this boundary.

pub mod analytics;
pub mod client;
pub mod events;
pub mod paginate;
pub mod types;

/// Sentinel prefix marking a tool's output as complete and authoritative.
///
/// The reasoning layer treats a result carrying this prefix as a final
/// answer and stops requesting further tool calls.
pub const FINAL_ANSWER_PREFIX: &str = "FINAL ANSWER:";

pub use analytics::{AnalyticsArgs, AnalyticsClient, EventStats};
pub use client::ApiClient;
pub use events::{EventsClient, ListEventsFilters};
pub use paginate::aggregate_pages;
pub use types::{Aggregate, Page, PageMeta, QueryParams, Record};
