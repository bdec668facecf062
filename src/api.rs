// ABOUTME: Blocking HTTP client for the Site24x7 REST API
// ABOUTME: Follows opaque offset cursors and retries once on auth failure

use crate::{auth::TokenProvider, Error, Result};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use std::time::Duration;

/// One monitor entry as returned by the API. The field set is not known in
/// advance; insertion order is preserved for column discovery.
pub type Record = serde_json::Map<String, serde_json::Value>;

pub const DEFAULT_BASE_URL: &str = "https://www.site24x7.com/api/";
pub const MONITOR_LIST_ENDPOINT: &str = "list_monitors";

/// Ceiling on pages followed before giving up on a non-terminating
/// offset chain.
const MAX_PAGES: usize = 1000;

pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: TokenProvider,
    max_pages: usize,
}

impl ApiClient {
    pub fn new(tokens: TokenProvider, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let mut base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.into());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(ApiClient {
            client,
            base_url,
            tokens,
            max_pages: MAX_PAGES,
        })
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetches every page of `endpoint`, concatenating record batches in
    /// server order. The cursor in `data.offset` is treated as opaque; the
    /// loop ends when the server stops returning one. Partial results are
    /// discarded on any failure.
    pub fn fetch_all(&mut self, endpoint: &str) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        for _ in 0..self.max_pages {
            let root = self.get_page(endpoint, offset.as_deref())?;
            let data = root.get("data");

            // Missing or non-array monitors means an empty page, not an error
            if let Some(batch) = data
                .and_then(|d| d.get("monitors"))
                .and_then(|m| m.as_array())
            {
                for item in batch {
                    if let serde_json::Value::Object(map) = item {
                        records.push(map.clone());
                    }
                }
            }

            offset = data
                .and_then(|d| d.get("offset"))
                .and_then(|o| o.as_str())
                .filter(|s| !s.is_empty())
                .map(String::from);

            if offset.is_none() {
                return Ok(records);
            }
        }

        Err(Error::PaginationLimit {
            pages: self.max_pages,
        })
    }

    fn get_page(&mut self, endpoint: &str, offset: Option<&str>) -> Result<serde_json::Value> {
        let token = self.tokens.access_token(false)?;
        let mut response = self.request(endpoint, offset, &token)?;

        // Stale token: force one refresh and retry the same request once
        if is_unauthorized(response.status()) {
            let token = self.tokens.access_token(true)?;
            response = self.request(endpoint, offset, &token)?;
            if is_unauthorized(response.status()) {
                return Err(Error::Auth(format!(
                    "still unauthorized after token refresh (HTTP {})",
                    response.status().as_u16()
                )));
            }
        }

        let response = response.error_for_status()?;
        let body = response.text()?;
        let root: serde_json::Value = serde_json::from_str(&body)?;
        Ok(root)
    }

    fn request(&self, endpoint: &str, offset: Option<&str>, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut request = self
            .client
            .get(&url)
            .header("Authorization", format!("Zoho-oauthtoken {}", token))
            .header("Accept", "application/json")
            .header("User-Agent", "monex/0.1 (Rust)");

        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        Ok(request.send()?)
    }
}

fn is_unauthorized(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}
