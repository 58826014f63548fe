//! Best-effort multi-page aggregation.
//!
//! Given the first page of a query, fetches every remaining page
//! sequentially and merges the records into one ordered sequence. A failed
//! secondary page is logged, counted, and skipped — partial data is
//! preferred over total failure.

use reqwest::Method;
use tracing::{debug, warn};

use super::client::ApiClient;
use super::types::{Aggregate, Page, QueryParams};

/// Fetches all remaining pages of a query and merges them with the first.
///
/// Pages are 1-indexed; the remaining range is `current_page + 1 ..=
/// page_count` inclusive. When `page_count <= 1` the first page's records
/// are returned unchanged with zero further calls.
///
/// Fetches are strictly sequential — the platform's rate limits and page
/// semantics assume ordered access — and each page reuses the original
/// query parameters plus `page[number]`. Records are concatenated in fetch
/// order without deduplication.
///
/// Secondary-page failures never abort the merge and are not retried; the
/// dropped pages are reported in [`Aggregate::pages_failed`].
pub async fn aggregate_pages(
    client: &ApiClient,
    first: Page,
    params: &QueryParams,
    endpoint: &str,
) -> Aggregate {
    let meta = first.meta;
    let mut records = first.records;
    let mut pages_failed = 0;

    if meta.page_count > 1 {
        for page in (meta.current_page + 1)..=meta.page_count {
            let page_params = params.with_page(page);
            match client
                .request(Method::GET, endpoint, Some(&page_params), None)
                .await
            {
                Ok(envelope) => {
                    let fetched = Page::from_envelope(&envelope);
                    debug!(page, records = fetched.records.len(), "page merged");
                    records.extend(fetched.records);
                }
                Err(e) => {
                    warn!(page, error = %e, "page fetch failed, skipping");
                    pages_failed += 1;
                }
            }
        }
    }

    Aggregate {
        records,
        meta,
        pages_failed,
    }
}
