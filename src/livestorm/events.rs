//! Event listing against the Livestorm API.
//!
//! Maps named filter inputs to the API's bracketed filter syntax, always
//! fetches the complete result set across every page, and renders a
//! sentinel-prefixed text summary for the reasoning layer.

use std::fmt::Write;

use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use super::FINAL_ANSWER_PREFIX;
use super::client::ApiClient;
use super::paginate::aggregate_pages;
use super::types::{Page, QueryParams};

/// Endpoint for event queries.
const EVENTS_ENDPOINT: &str = "events";

/// Named filter inputs for [`EventsClient::list_events`].
///
/// Only present filters are forwarded. `page_number` is accepted for
/// schema compatibility with the reasoning layer but ignored — the tool
/// always fetches every page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEventsFilters {
    /// Filter by event title.
    #[serde(default)]
    pub filter_title: Option<String>,
    /// Filter by scheduling status (e.g. `upcoming`, `live`, `ended`).
    #[serde(default)]
    pub filter_scheduling_status: Option<String>,
    /// Only events created at or after this timestamp.
    #[serde(default)]
    pub filter_created_since: Option<String>,
    /// Only events created at or before this timestamp.
    #[serde(default)]
    pub filter_created_until: Option<String>,
    /// Only events updated at or after this timestamp.
    #[serde(default)]
    pub filter_updated_since: Option<String>,
    /// Only events updated at or before this timestamp.
    #[serde(default)]
    pub filter_updated_until: Option<String>,
    /// Include related session data in the response.
    #[serde(default)]
    pub include_sessions: Option<bool>,
    /// Ignored. The tool always fetches all pages.
    #[serde(default)]
    pub page_number: Option<String>,
}

impl ListEventsFilters {
    /// Builds the outgoing query parameters.
    ///
    /// Absent filters are omitted entirely; `page_number` is never
    /// forwarded.
    #[must_use]
    pub fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("filter[title]", self.filter_title.as_deref());
        params.push_opt(
            "filter[scheduling_status]",
            self.filter_scheduling_status.as_deref(),
        );
        params.push_opt("filter[created_since]", self.filter_created_since.as_deref());
        params.push_opt("filter[created_until]", self.filter_created_until.as_deref());
        params.push_opt("filter[updated_since]", self.filter_updated_since.as_deref());
        params.push_opt("filter[updated_until]", self.filter_updated_until.as_deref());
        if self.include_sessions == Some(true) {
            params.push("include", "sessions");
        }
        params
    }
}

/// Client for Livestorm event listing.
#[derive(Debug, Clone)]
pub struct EventsClient {
    api: ApiClient,
}

impl EventsClient {
    /// Creates an events client over the given API client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Lists all events matching the filters, across every page.
    ///
    /// Returns a text summary: on success a sentinel-prefixed count plus
    /// one line per event in aggregation order, on failure an
    /// `"Error: …"` string. Errors are surfaced as ordinary text because
    /// the consuming reasoning loop only understands string outputs.
    pub async fn list_events(&self, filters: &ListEventsFilters) -> String {
        let params = filters.to_query_params();
        debug!(params = params.len(), "listing events");

        let envelope = match self
            .api
            .request(Method::GET, EVENTS_ENDPOINT, Some(&params), None)
            .await
        {
            Ok(envelope) => envelope,
            Err(e) => return format!("Error: {e}"),
        };

        let first = Page::from_envelope(&envelope);
        let aggregate = aggregate_pages(&self.api, first, &params, EVENTS_ENDPOINT).await;

        if aggregate.records.is_empty() {
            return format!("{FINAL_ANSWER_PREFIX} No events found.");
        }

        let total = aggregate.records.len();
        let mut summary = format!(
            "{FINAL_ANSWER_PREFIX} Found {total} events across all pages. \
             Here are all event titles:"
        );
        for record in &aggregate.records {
            let _ = write!(
                summary,
                "\n- {} (ID: {}, Status: {})",
                record.title(),
                record.id_or_unknown(),
                record.scheduling_status()
            );
        }
        summary
    }
}
