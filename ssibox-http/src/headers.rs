//! Header names and values exchanged with origins, the edge layer and the
//! page's own client.

use http::{HeaderName, HeaderValue};

/// Outbound request header carrying the include depth of a fetch.
pub const DEPTH_GUARD_HEADER: HeaderName = HeaderName::from_static("x-depth-guard");

/// Error signal set on a response whose includes hit the depth limit.
///
/// Set by this engine on its own response, and read from fetched responses
/// to detect that a downstream instance hit the limit.
pub const DEPTH_ERROR_HEADER: HeaderName = HeaderName::from_static("x-depth-error");

/// Response header telling the edge layer to process `<esi:include>` tags.
pub const ESI_HEADER: HeaderName = HeaderName::from_static("x-esi");

/// Inbound request header whose presence means the request came through the
/// edge layer.
pub const EDGE_REQUEST_HEADER: HeaderName = HeaderName::from_static("x-varnish");

/// [`DEPTH_ERROR_HEADER`] value when this engine refused to fetch.
pub const DEPTH_LIMIT_MESSAGE: HeaderValue = HeaderValue::from_static("Too deep!");

/// [`DEPTH_ERROR_HEADER`] value when a fetched include reported the error.
pub const NESTED_DEPTH_MESSAGE: HeaderValue =
    HeaderValue::from_static("The included URL caused recursion that was too deep!");

/// [`ESI_HEADER`] value.
pub const ESI_ENABLED: HeaderValue = HeaderValue::from_static("yes");
