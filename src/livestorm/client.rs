//! HTTP client for the Livestorm REST API.
//!
//! One network call per invocation, no retries. Success returns the parsed
//! response body unchanged; transport failures and non-2xx statuses are
//! normalized into [`ApiError`] so callers never see a raw transport
//! error.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, Method};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

use super::types::QueryParams;

/// The JSON:API media type Livestorm responds with.
const ACCEPT_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Client for Livestorm API requests.
///
/// Holds the base URL, the caller-supplied API key (forwarded verbatim in
/// the `Authorization` header, no transformation or refresh logic), and a
/// pooled HTTP client with a per-request timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    /// Creates a client for the given base URL and API key.
    ///
    /// The timeout bounds each single HTTP call; a multi-page aggregation
    /// is bounded only per page, not in total.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Build`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("stormline/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Build {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Issues one request against the API.
    ///
    /// The URL is the base address joined with `endpoint`, trimming
    /// redundant separators. Query parameters and body are attached only
    /// when supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] for network failures (no status) and
    /// non-2xx responses (with status), [`ApiError::Decode`] when a 2xx
    /// body is not valid JSON. Never panics and never surfaces a
    /// `reqwest::Error`.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        debug!(%method, %url, "livestorm request");

        let mut request = self
            .http
            .request(method, &url)
            .header(ACCEPT, ACCEPT_MEDIA_TYPE)
            .header(AUTHORIZATION, &self.api_key);

        if let Some(params) = params {
            request = request.query(params.as_pairs());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| ApiError::Request {
            message: format!("API request failed: {e}"),
            status: e.status().map(|s| s.as_u16()),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Request {
                message: format!(
                    "API request failed: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("error")
                ),
                status: Some(status.as_u16()),
            });
        }

        response.json::<Value>().await.map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }
}
