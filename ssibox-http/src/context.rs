use http::header::HOST;
use http::request::Parts;
use ssibox_core::{Depth, RequestContext, RequestContextBuilder};

use crate::headers::{DEPTH_GUARD_HEADER, EDGE_REQUEST_HEADER};

/// Starts a [`RequestContext`] from an inbound request.
///
/// Fills in what the request itself tells: the server name (URI authority,
/// else the `Host` header, without port), whether it is secure, the
/// inbound include depth and whether it came through the edge layer. Site
/// layout (`base_path`, `request_path`, `use_base_tag`) is left to the
/// caller; `request_path` defaults to the URI path without its leading
/// slash.
///
/// ```
/// use http::Request;
/// use ssibox_core::Depth;
/// use ssibox_http::request_context;
///
/// let request = Request::get("/news")
///     .header("host", "www.example.org:8080")
///     .header("x-depth-guard", "2")
///     .body(())
///     .unwrap();
/// let (parts, _) = request.into_parts();
///
/// let ctx = request_context(&parts).base_path("/").build();
/// assert_eq!(ctx.host(), "www.example.org");
/// assert_eq!(ctx.request_path(), "news");
/// assert_eq!(ctx.depth(), Depth::new(2));
/// assert!(!ctx.via_edge());
/// ```
pub fn request_context(parts: &Parts) -> RequestContextBuilder {
    let host = parts
        .uri
        .host()
        .map(str::to_owned)
        .or_else(|| {
            parts
                .headers
                .get(HOST)
                .and_then(|value| value.to_str().ok())
                .map(strip_port)
        })
        .unwrap_or_default();

    let secure = parts
        .uri
        .scheme_str()
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https"));

    RequestContext::builder(host)
        .secure(secure)
        .request_path(parts.uri.path().trim_start_matches('/'))
        .depth(Depth::from_header(parts.headers.get(DEPTH_GUARD_HEADER)))
        .via_edge(parts.headers.contains_key(EDGE_REQUEST_HEADER))
}

fn strip_port(host: &str) -> String {
    if host.starts_with('[') {
        // IPv6 literal, keep the brackets.
        return host
            .find(']')
            .map_or(host, |end| &host[..=end])
            .to_owned();
    }
    host.split_once(':').map_or(host, |(host, _port)| host).to_owned()
}
