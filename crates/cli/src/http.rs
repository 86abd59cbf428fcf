//! Blocking HTTP transport for the extractor.

use deck_core::{Error, Result};
use deck_extract::{FetchResponse, Fetcher};
use std::time::Duration;
use ureq::Agent;

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Browser-like user agent; some sites refuse unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// [`Fetcher`] backed by a pooled `ureq` agent.
pub struct UreqFetcher {
    agent: Agent,
    user_agent: String,
}

impl UreqFetcher {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        // Non-2xx responses come back as data, not transport errors
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            user_agent: user_agent.into(),
        }
    }
}

impl Default for UreqFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT), DEFAULT_USER_AGENT)
    }
}

impl Fetcher for UreqFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let response = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| Error::Fetch(format!("failed to read body of {}: {}", url, e)))?;

        log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(FetchResponse::new(status, body))
    }
}
