use anyhow::Result;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::constants::{REQUEST_TIMEOUT, USER_AGENT};

/// Issues single outbound GET requests and collapses every failure mode into
/// an absence value.
///
/// Callers branch only on presence; the reason a request failed (DNS, TLS,
/// timeout, non-2xx status, undecodable body) is logged here and deliberately
/// not carried upward.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher with the identifying user agent and the request
    /// timeout installed on the underlying client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    /// Performs one GET and decodes the JSON body into `T`.
    ///
    /// Per-call headers are merged over the client defaults, so a caller that
    /// sets `User-Agent` overrides the identifying header for that request
    /// only. Returns `None` for any transport failure, non-success status, or
    /// decode failure. Never retries.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: HeaderMap,
        params: Option<&[(&str, &str)]>,
    ) -> Option<T> {
        let mut request = self.client.get(url).headers(headers);
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("GET {} failed: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("GET {} returned status {}", url, status);
            return None;
        }

        match response.json::<T>().await {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("GET {} returned an undecodable body: {}", url, e);
                None
            }
        }
    }
}
