use http::StatusCode;
use thiserror::Error;

/// Reasons a fetch produced no content.
///
/// Never returned from [`Fetcher::fetch`](ssibox_core::Fetcher::fetch),
/// which folds every error into a failed result. Available through
/// [`ReqwestFetcher::try_fetch`](crate::ReqwestFetcher::try_fetch).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connecting, sending or waiting for the response failed, including
    /// timeouts.
    #[error("request failed: {0}")]
    Request(#[from] reqwest_middleware::Error),
    /// The origin answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(StatusCode),
    /// Reading the response body failed.
    #[error("failed to read body: {0}")]
    Body(#[source] reqwest::Error),
}

impl FetchError {
    /// Returns `true` if the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Request(reqwest_middleware::Error::Reqwest(error)) => error.is_timeout(),
            FetchError::Request(_) => false,
            FetchError::Body(error) => error.is_timeout(),
            FetchError::Status(_) => false,
        }
    }
}
