use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use ssibox_core::FetchResult;

/// Serializable form of a successful fetch, as stored in the shared tier.
///
/// Header values that are not valid UTF-8 are not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// Response body.
    pub body: Bytes,
    /// Response headers in arrival order.
    pub headers: Vec<(String, String)>,
}

impl CachedResponse {
    /// Captures a fetch result. Returns `None` for failed fetches, which are
    /// never shared.
    pub fn from_fetch(result: &FetchResult) -> Option<Self> {
        let body = result.body.clone()?;
        let headers = result
            .headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_owned(), value.to_owned()))
            })
            .collect();
        Some(Self { body, headers })
    }

    /// Rebuilds the fetch result.
    pub fn into_fetch(self) -> FetchResult {
        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                headers.append(name, value);
            }
        }
        FetchResult::success(self.body, headers)
    }
}
