use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::USER_AGENT;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

/// Anything that can hand back a page body for a URL.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Plain GET client with an explicit timeout so a stalled server cannot hang
/// the run.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl PageSource for HttpClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let request_err = |source| FetchError::Request { url: url.to_string(), source };

        let start = Instant::now();
        let response = self.client.get(url).send().await.map_err(request_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status });
        }
        let body = response.text().await.map_err(request_err)?;

        debug!(
            "GET {} -> {} ({} bytes, {}ms)",
            url,
            status,
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// In-memory site: known URLs return their body, anything else is a 404.
    #[derive(Default)]
    pub struct FakeSite {
        pages: HashMap<String, String>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeSite {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
            self.pages.insert(url.to_string(), html.into());
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl PageSource for FakeSite {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.calls.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            })
        }
    }
}
