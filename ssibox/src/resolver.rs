//! Turning directive targets into absolute URLs.

use ssibox_core::{RequestContext, ResolvedUrl, UrlParts};

use crate::IncludeConfig;

/// Resolves directive targets against the inbound request.
///
/// Resolution never fails. Missing components are filled in from the
/// [`RequestContext`]:
///
/// - scheme: the inbound scheme
/// - host: the inbound server name
/// - relative path: anchored at the base path, and at the current page
///   unless the site renders a `<base>` tag
/// - no path at all: `/`
///
/// Hosts ending with the federation suffix additionally get the partial
/// rendering query parameter.
///
/// ```
/// use ssibox::UrlResolver;
/// use ssibox_core::RequestContext;
///
/// let ctx = RequestContext::builder("www.unl.edu")
///     .base_path("/site/")
///     .request_path("news")
///     .build();
/// let resolver = UrlResolver::default();
///
/// assert_eq!(
///     resolver.resolve("nav.html?a=1", &ctx).to_string(),
///     "http://www.unl.edu/site/news/nav.html?a=1&format=partial"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResolver {
    federation_suffix: String,
    partial_query: String,
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::from_config(&IncludeConfig::default())
    }
}

impl UrlResolver {
    /// Creates a resolver that appends `partial_query` for hosts ending with
    /// `federation_suffix`.
    pub fn new(federation_suffix: impl Into<String>, partial_query: impl Into<String>) -> Self {
        Self {
            federation_suffix: federation_suffix.into(),
            partial_query: partial_query.into(),
        }
    }

    /// Creates a resolver from the engine configuration.
    pub fn from_config(config: &IncludeConfig) -> Self {
        Self::new(&config.federation_suffix, &config.partial_query)
    }

    /// Resolves a raw, still entity-encoded directive target.
    pub fn resolve(&self, target: &str, ctx: &RequestContext) -> ResolvedUrl {
        let decoded = html_escape::decode_html_entities(target);
        let parts = UrlParts::parse(&decoded);

        let scheme = parts.scheme.unwrap_or_else(|| ctx.scheme().to_owned());
        let host = parts.host.unwrap_or_else(|| ctx.host().to_owned());
        let path = match parts.path {
            Some(path) if path.starts_with('/') => path,
            Some(path) if ctx.use_base_tag() => format!("{}{}", ctx.base_path(), path),
            Some(path) => format!("{}{}/{}", ctx.base_path(), ctx.request_path(), path),
            None => "/".to_owned(),
        };

        let query = if self.is_federated(&host) {
            Some(match parts.query {
                Some(query) if !query.is_empty() => format!("{query}&{}", self.partial_query),
                _ => self.partial_query.clone(),
            })
        } else {
            parts.query
        };

        ResolvedUrl {
            scheme,
            host,
            port: parts.port,
            path,
            query,
            fragment: parts.fragment,
        }
    }

    fn is_federated(&self, host: &str) -> bool {
        let suffix = self.federation_suffix.as_bytes();
        let host = host.as_bytes();
        !suffix.is_empty()
            && !self.partial_query.is_empty()
            && host.len() >= suffix.len()
            && host[host.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx() -> RequestContext {
        RequestContext::builder("example.org")
            .base_path("/site/")
            .request_path("page")
            .build()
    }

    fn resolve(target: &str, ctx: &RequestContext) -> String {
        UrlResolver::default().resolve(target, ctx).to_string()
    }

    #[test]
    fn test_absolute_path_gets_scheme_and_host() {
        let ctx = RequestContext::builder("example.org")
            .base_path("/site")
            .request_path("/page")
            .build();
        assert_eq!(resolve("/foo", &ctx), "http://example.org/foo");
    }

    #[test]
    fn test_secure_request_defaults_to_https() {
        let ctx = RequestContext::builder("example.org").secure(true).build();
        assert_eq!(resolve("/foo", &ctx), "https://example.org/foo");
    }

    #[test]
    fn test_relative_path_anchored_at_page() {
        assert_eq!(resolve("nav.html", &ctx()), "http://example.org/site/page/nav.html");
    }

    #[test]
    fn test_relative_path_with_base_tag() {
        let ctx = RequestContext::builder("example.org")
            .base_path("/site/")
            .request_path("page")
            .use_base_tag(true)
            .build();
        assert_eq!(resolve("nav.html", &ctx), "http://example.org/site/nav.html");
    }

    #[test]
    fn test_missing_path_becomes_root() {
        assert_eq!(resolve("http://other.org", &ctx()), "http://other.org/");
        assert_eq!(resolve("", &ctx()), "http://example.org/");
        assert_eq!(resolve("?x=1", &ctx()), "http://example.org/?x=1");
    }

    #[test]
    fn test_port_and_fragment_are_kept() {
        assert_eq!(
            resolve("https://other.org:8443/a?b=1#c", &ctx()),
            "https://other.org:8443/a?b=1#c"
        );
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(
            resolve("/a?x=1&amp;y=2", &ctx()),
            "http://example.org/a?x=1&y=2"
        );
    }

    #[test]
    fn test_federated_host_gets_partial_query() {
        assert_eq!(
            resolve("//other.unl.edu/x", &ctx()),
            "http://other.unl.edu/x?format=partial"
        );
        assert_eq!(
            resolve("http://WWW.UNL.EDU/x?a=1", &ctx()),
            "http://WWW.UNL.EDU/x?a=1&format=partial"
        );
        assert_eq!(
            resolve("http://www.unl.edu/x?#top", &ctx()),
            "http://www.unl.edu/x?format=partial#top"
        );
    }

    #[test]
    fn test_scheme_less_host_is_a_relative_path() {
        let ctx = RequestContext::builder("www.unl.edu")
            .request_path("news")
            .build();
        assert_eq!(
            resolve("other.unl.edu/x", &ctx),
            "http://www.unl.edu/news/other.unl.edu/x?format=partial"
        );
    }

    #[test]
    fn test_custom_suffix() {
        let resolver = UrlResolver::new("example.edu", "partial=1");
        let url = resolver.resolve("http://cs.example.edu/a", &ctx());
        assert_eq!(url.query.as_deref(), Some("partial=1"));

        let url = resolver.resolve("http://www.unl.edu/a", &ctx());
        assert_eq!(url.query, None);
    }

    #[test]
    fn test_empty_suffix_disables_partial_query() {
        let resolver = UrlResolver::new("", "format=partial");
        assert_eq!(resolver.resolve("/a", &ctx()).query, None);
    }
}
