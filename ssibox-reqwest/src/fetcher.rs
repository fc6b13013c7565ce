use std::time::Duration;

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use ssibox_core::{FetchOptions, FetchResult, Fetcher};
use ssibox_http::headers::DEPTH_GUARD_HEADER;
use tracing::{debug, trace};

use crate::FetchError;

/// Timeout applied to a fetch unless the fetcher or the call overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// [`Fetcher`] that issues include requests through a `reqwest` client.
///
/// Cloning is cheap, the underlying client is shared.
#[derive(Clone, Debug)]
pub struct ReqwestFetcher {
    client: ClientWithMiddleware,
    timeout: Duration,
}

impl ReqwestFetcher {
    /// Wraps a plain client.
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_middleware(ClientBuilder::new(client).build())
    }

    /// Wraps a client that already has a middleware stack.
    pub fn with_middleware(client: ClientWithMiddleware) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the default timeout for fetches that don't carry their own.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetches `url` and reports why it failed, if it did.
    pub async fn try_fetch(
        &self,
        url: &str,
        options: FetchOptions,
    ) -> Result<FetchResult, FetchError> {
        let timeout = options.timeout.unwrap_or(self.timeout);
        trace!(url, depth = %options.depth, ?timeout, "fetching include");

        let response = self
            .client
            .get(url)
            .header(DEPTH_GUARD_HEADER, options.depth.to_header_value())
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(FetchError::Body)?;
        Ok(FetchResult::success(body, headers))
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, options: FetchOptions) -> FetchResult {
        match self.try_fetch(url, options).await {
            Ok(result) => result,
            Err(error) => {
                debug!(url, %error, timeout = error.is_timeout(), "include fetch failed");
                FetchResult::failure()
            }
        }
    }
}
