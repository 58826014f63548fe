//! Data shapes for the Livestorm API: query parameters, records, page
//! envelopes, and the merged multi-page aggregate.
//!
//! Records are opaque JSON:API resources; only the attribute fields the
//! tools read get typed accessors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameter used to request a specific page.
pub const PAGE_NUMBER_PARAM: &str = "page[number]";

/// Ordered query parameters for a Livestorm request.
///
/// Absent filters are never inserted, so nothing is ever sent as an empty
/// or null value. Order is insertion order, which keeps outgoing URLs
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Appends a parameter only when a value is present.
    pub fn push_opt(&mut self, name: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.0.push((name.to_string(), v.to_string()));
        }
    }

    /// Returns a copy with `page[number]` appended, for fetching a
    /// specific page with the original filters intact.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        let mut params = self.clone();
        params.push(PAGE_NUMBER_PARAM, page.to_string());
        params
    }

    /// Returns the parameters as name/value pairs for the HTTP layer.
    #[must_use]
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A single Livestorm resource (event, session, person).
///
/// Treated as opaque except for the identifier and the attribute fields
/// the query tools read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Resource identifier, when present.
    #[serde(default)]
    pub id: Option<String>,
    /// Attribute map, kept as raw JSON.
    #[serde(default)]
    pub attributes: Value,
}

impl Record {
    /// Returns a string attribute by key, if present.
    #[must_use]
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Returns the event title, or a placeholder when absent.
    #[must_use]
    pub fn title(&self) -> &str {
        self.attr_str("title").unwrap_or("(no title)")
    }

    /// Returns the scheduling status, or `"unknown"` when absent.
    #[must_use]
    pub fn scheduling_status(&self) -> &str {
        self.attr_str("scheduling_status").unwrap_or("unknown")
    }

    /// Returns the session count, defaulting to zero.
    #[must_use]
    pub fn sessions_count(&self) -> u64 {
        self.attributes
            .get("sessions_count")
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    /// Returns the identifier, or `"?"` when absent.
    #[must_use]
    pub fn id_or_unknown(&self) -> &str {
        self.id.as_deref().unwrap_or("?")
    }
}

/// Pagination metadata from a response envelope.
///
/// Pages are 1-indexed: the first page is `current_page = 1` and the last
/// page is `current_page = page_count`. Missing fields default to 1, which
/// makes an envelope without `meta` a single complete page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// The page this envelope holds.
    #[serde(default = "default_page")]
    pub current_page: u32,
    /// Total number of pages for the query.
    #[serde(default = "default_page")]
    pub page_count: u32,
}

const fn default_page() -> u32 {
    1
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_count: 1,
        }
    }
}

/// One successfully fetched page: records plus pagination metadata.
///
/// Failure is [`crate::error::ApiError`] — a page is success or error,
/// never both.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Records in server order.
    pub records: Vec<Record>,
    /// Pagination metadata for this page.
    pub meta: PageMeta,
}

impl Page {
    /// Parses a page from a `{data: [...], meta: {...}}` response envelope.
    ///
    /// Tolerant of missing pieces: absent `data` yields no records, absent
    /// or partial `meta` defaults to a single complete page, and records
    /// that fail to deserialize are dropped rather than failing the page.
    #[must_use]
    pub fn from_envelope(envelope: &Value) -> Self {
        let records = envelope
            .get("data")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        let meta = envelope
            .get("meta")
            .and_then(|m| serde_json::from_value(m.clone()).ok())
            .unwrap_or_default();

        Self { records, meta }
    }
}

/// The merged result of fetching every page of a query.
///
/// Records are the concatenation of all successfully fetched pages in
/// ascending page order, without deduplication. `meta` is the last meta
/// seen (the first page's, since secondary fetches only contribute
/// records). `pages_failed` counts secondary pages that were dropped —
/// zero means the aggregate is complete.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// All records across fetched pages, first page first.
    pub records: Vec<Record>,
    /// Pagination metadata from the first page.
    pub meta: PageMeta,
    /// Number of secondary pages that failed and were skipped.
    pub pages_failed: u32,
}

impl Aggregate {
    /// Returns `true` when every page was fetched successfully.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.pages_failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_params_skip_absent_values() {
        let mut params = QueryParams::new();
        params.push_opt("filter[title]", Some("Rust"));
        params.push_opt("filter[scheduling_status]", None);
        assert_eq!(params.len(), 1);
        assert_eq!(
            params.as_pairs(),
            &[("filter[title]".to_string(), "Rust".to_string())]
        );
    }

    #[test]
    fn test_with_page_preserves_original() {
        let mut params = QueryParams::new();
        params.push("filter[title]", "Rust");
        let paged = params.with_page(3);
        assert_eq!(params.len(), 1);
        assert_eq!(paged.len(), 2);
        assert_eq!(
            paged.as_pairs()[1],
            (PAGE_NUMBER_PARAM.to_string(), "3".to_string())
        );
    }

    #[test]
    fn test_record_accessors() {
        let record: Record = serde_json::from_value(json!({
            "id": "ev_1",
            "attributes": {
                "title": "Launch webinar",
                "scheduling_status": "upcoming",
                "sessions_count": 3
            }
        }))
        .unwrap_or_else(|_| unreachable!());
        assert_eq!(record.id_or_unknown(), "ev_1");
        assert_eq!(record.title(), "Launch webinar");
        assert_eq!(record.scheduling_status(), "upcoming");
        assert_eq!(record.sessions_count(), 3);
    }

    #[test]
    fn test_record_defaults_for_missing_fields() {
        let record: Record =
            serde_json::from_value(json!({})).unwrap_or_else(|_| unreachable!());
        assert_eq!(record.id_or_unknown(), "?");
        assert_eq!(record.title(), "(no title)");
        assert_eq!(record.scheduling_status(), "unknown");
        assert_eq!(record.sessions_count(), 0);
    }

    #[test]
    fn test_page_from_envelope() {
        let page = Page::from_envelope(&json!({
            "data": [
                {"id": "a", "attributes": {}},
                {"id": "b", "attributes": {}}
            ],
            "meta": {"current_page": 1, "page_count": 4}
        }));
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.meta.page_count, 4);
    }

    #[test]
    fn test_page_from_envelope_missing_meta_is_single_page() {
        let page = Page::from_envelope(&json!({"data": []}));
        assert!(page.records.is_empty());
        assert_eq!(page.meta, PageMeta::default());
        assert_eq!(page.meta.page_count, 1);
    }

    #[test]
    fn test_page_from_envelope_not_an_envelope() {
        let page = Page::from_envelope(&json!("nonsense"));
        assert!(page.records.is_empty());
        assert_eq!(page.meta.page_count, 1);
    }
}
