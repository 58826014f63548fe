//! Event analytics over the full Livestorm event set.
//!
//! Fetches every event through the same aggregation path as listing, then
//! computes status and session statistics and renders a fixed-structure
//! report. The arithmetic is split out into [`EventStats`] so it is
//! testable without HTTP.

use std::collections::BTreeMap;
use std::fmt::Write;

use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use super::FINAL_ANSWER_PREFIX;
use super::client::ApiClient;
use super::paginate::aggregate_pages;
use super::types::{Page, QueryParams, Record};

/// Endpoint for event queries.
const EVENTS_ENDPOINT: &str = "events";

/// Terminal scheduling status.
const ENDED_STATUS: &str = "ended";

/// Input for [`AnalyticsClient::comprehensive_analytics`].
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsArgs {
    /// Whether to include related session data in the fetch.
    #[serde(default = "default_include_sessions")]
    pub include_sessions: bool,
}

const fn default_include_sessions() -> bool {
    true
}

impl Default for AnalyticsArgs {
    fn default() -> Self {
        Self {
            include_sessions: true,
        }
    }
}

/// Aggregated statistics over a set of event records.
///
/// Percentages and averages are guarded: with zero events every ratio
/// reports zero instead of dividing by zero.
#[derive(Debug, Clone, Default)]
pub struct EventStats {
    /// Total number of events.
    pub total_events: usize,
    /// Event count per scheduling status, sorted by status name.
    pub status_counts: BTreeMap<String, usize>,
    /// Session count per scheduling status, sorted by status name.
    pub sessions_by_status: BTreeMap<String, u64>,
    /// Total sessions across all events.
    pub total_sessions: u64,
    /// Events in the terminal `ended` status.
    pub ended_events: usize,
    /// Events with a nonzero session count.
    pub events_with_sessions: usize,
}

impl EventStats {
    /// Computes statistics over the given records.
    #[must_use]
    pub fn collect(records: &[Record]) -> Self {
        let mut stats = Self {
            total_events: records.len(),
            ..Self::default()
        };

        for record in records {
            let status = record.scheduling_status();
            let sessions = record.sessions_count();

            *stats.status_counts.entry(status.to_string()).or_default() += 1;
            *stats
                .sessions_by_status
                .entry(status.to_string())
                .or_default() += sessions;
            stats.total_sessions += sessions;

            if sessions > 0 {
                stats.events_with_sessions += 1;
            }
            if status == ENDED_STATUS {
                stats.ended_events += 1;
            }
        }

        stats
    }

    /// Percentage of events in the given status bucket (zero when empty).
    #[must_use]
    pub fn status_percentage(&self, count: usize) -> f64 {
        percentage(count, self.total_events)
    }

    /// Percentage of events in the terminal status (zero when empty).
    #[must_use]
    pub fn ended_percentage(&self) -> f64 {
        percentage(self.ended_events, self.total_events)
    }

    /// Average sessions per event (zero when empty).
    #[must_use]
    pub fn average_sessions(&self) -> f64 {
        if self.total_events == 0 {
            0.0
        } else {
            // Session totals are far below 2^52; the casts are exact.
            #[allow(clippy::cast_precision_loss)]
            {
                self.total_sessions as f64 / self.total_events as f64
            }
        }
    }

    /// Events not in the terminal status.
    #[must_use]
    pub const fn active_events(&self) -> usize {
        self.total_events - self.ended_events
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        {
            count as f64 / total as f64 * 100.0
        }
    }
}

/// Title-cases a status name for the breakdown section
/// (`"on_demand"` → `"On Demand"`).
fn title_case(status: &str) -> String {
    status
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the fixed multi-section analytics report.
fn render_report(stats: &EventStats) -> String {
    let mut report = format!(
        "{FINAL_ANSWER_PREFIX} COMPREHENSIVE EVENT ANALYTICS\n\
         \n\
         \u{1f4ca} OVERALL STATISTICS:\n\
         \u{2022} Total Events: {}\n\
         \u{2022} Ended Events: {}\n\
         \u{2022} Total Sessions: {}\n\
         \u{2022} Average Sessions per Event: {:.1}\n\
         \n\
         \u{1f4c8} EVENT STATUS BREAKDOWN:",
        stats.total_events,
        stats.ended_events,
        stats.total_sessions,
        stats.average_sessions(),
    );

    for (status, count) in &stats.status_counts {
        let _ = write!(
            report,
            "\n\u{2022} {}: {count} ({:.1}%)",
            title_case(status),
            stats.status_percentage(*count)
        );
    }

    let _ = write!(
        report,
        "\n\n\u{1f3af} KEY METRICS:\n\
         \u{2022} Ended Events Percentage: {:.1}%\n\
         \u{2022} Active Events (not ended): {}\n\
         \u{2022} Events with Sessions: {}\n\
         \n\
         \u{1f4cb} DETAILED STATUS COUNTS:",
        stats.ended_percentage(),
        stats.active_events(),
        stats.events_with_sessions,
    );

    for (status, count) in &stats.status_counts {
        let sessions = stats.sessions_by_status.get(status).copied().unwrap_or(0);
        let _ = write!(report, "\n  {status}: {count} events, {sessions} sessions");
    }

    report
}

/// Client for comprehensive event analytics.
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    api: ApiClient,
}

impl AnalyticsClient {
    /// Creates an analytics client over the given API client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Computes analytics over every event, across every page.
    ///
    /// Returns the report as text on success and an `"Error: …"` string
    /// on failure, matching the listing tool's convention.
    pub async fn comprehensive_analytics(&self, args: &AnalyticsArgs) -> String {
        let mut params = QueryParams::new();
        if args.include_sessions {
            params.push("include", "sessions");
        }

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
        debug!(
            events = aggregate.records.len(),
            pages_failed = aggregate.pages_failed,
            "computing analytics"
        );

        render_report(&EventStats::collect(&aggregate.records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use test_case::test_case;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record(status: &str, sessions: u64) -> Record {
        serde_json::from_value(json!({
            "id": "ev",
            "attributes": {"scheduling_status": status, "sessions_count": sessions}
        }))
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn test_stats_over_mixed_statuses() {
        let records = vec![record("ended", 2), record("ended", 0), record("live", 1)];
        let stats = EventStats::collect(&records);

        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.ended_events, 2);
        assert_eq!(stats.active_events(), 1);
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.events_with_sessions, 2);
        assert_eq!(stats.status_counts.get("ended"), Some(&2));
        assert_eq!(stats.status_counts.get("live"), Some(&1));
        assert_eq!(stats.sessions_by_status.get("ended"), Some(&2));
        assert!((stats.ended_percentage() - 66.666_666).abs() < 0.001);
    }

    #[test]
    fn test_stats_zero_events_all_ratios_zero() {
        let stats = EventStats::collect(&[]);
        assert_eq!(stats.total_events, 0);
        assert!((stats.ended_percentage() - 0.0).abs() < f64::EPSILON);
        assert!((stats.average_sessions() - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.active_events(), 0);
    }

    #[test]
    fn test_missing_status_counts_as_unknown() {
        let bare: Record =
            serde_json::from_value(json!({"id": "x"})).unwrap_or_else(|_| unreachable!());
        let stats = EventStats::collect(&[bare]);
        assert_eq!(stats.status_counts.get("unknown"), Some(&1));
        assert_eq!(stats.ended_events, 0);
    }

    #[test_case("ended", "Ended")]
    #[test_case("on_demand", "On Demand")]
    #[test_case("upcoming", "Upcoming")]
    #[test_case("", "")]
    fn test_title_case(input: &str, expected: &str) {
        assert_eq!(title_case(input), expected);
    }

    #[test]
    fn test_report_structure() {
        let records = vec![record("ended", 2), record("ended", 0), record("live", 1)];
        let report = render_report(&EventStats::collect(&records));

        assert!(report.starts_with("FINAL ANSWER: COMPREHENSIVE EVENT ANALYTICS"));
        assert!(report.contains("\u{2022} Total Events: 3"));
        assert!(report.contains("\u{2022} Ended Events: 2"));
        assert!(report.contains("\u{2022} Total Sessions: 3"));
        assert!(report.contains("\u{2022} Average Sessions per Event: 1.0"));
        assert!(report.contains("\u{2022} Ended: 2 (66.7%)"));
        assert!(report.contains("\u{2022} Live: 1 (33.3%)"));
        assert!(report.contains("\u{2022} Ended Events Percentage: 66.7%"));
        assert!(report.contains("\u{2022} Active Events (not ended): 1"));
        assert!(report.contains("\u{2022} Events with Sessions: 2"));
        assert!(report.contains("  ended: 2 events, 2 sessions"));
        assert!(report.contains("  live: 1 events, 1 sessions"));
        // Status breakdown is sorted by status name.
        let ended_pos = report.find("\u{2022} Ended: 2").unwrap_or(usize::MAX);
        let live_pos = report.find("\u{2022} Live: 1").unwrap_or(0);
        assert!(ended_pos < live_pos);
    }

    #[test]
    fn test_report_zero_events_renders_zeros() {
        let report = render_report(&EventStats::collect(&[]));
        assert!(report.contains("\u{2022} Total Events: 0"));
        assert!(report.contains("\u{2022} Average Sessions per Event: 0.0"));
        assert!(report.contains("\u{2022} Ended Events Percentage: 0.0%"));
    }

    #[tokio::test]
    async fn test_analytics_fetches_with_sessions_included() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .and(query_param("include", "sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": "a", "attributes": {"scheduling_status": "ended", "sessions_count": 4}},
                ],
                "meta": {"current_page": 1, "page_count": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), "key", Duration::from_secs(5))
            .unwrap_or_else(|e| unreachable!("client build failed: {e}"));
        let report = AnalyticsClient::new(api)
            .comprehensive_analytics(&AnalyticsArgs::default())
            .await;
        assert!(report.contains("\u{2022} Total Events: 1"));
        assert!(report.contains("\u{2022} Total Sessions: 4"));
    }

    #[tokio::test]
    async fn test_analytics_error_is_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), "key", Duration::from_secs(5))
            .unwrap_or_else(|e| unreachable!("client build failed: {e}"));
        let report = AnalyticsClient::new(api)
            .comprehensive_analytics(&AnalyticsArgs::default())
            .await;
        assert!(report.starts_with("Error: "));
    }
}
