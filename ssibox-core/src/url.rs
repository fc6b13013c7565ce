//! URL component types.
//!
//! Include targets are frequently relative (`nav.html`), host-less
//! (`/shared/footer`) or scheme-less (`//cdn.example.org/x`). [`UrlParts`]
//! keeps every component optional so the resolver can tell an absent
//! component from an empty one, and [`ResolvedUrl`] is the fully qualified
//! result with a canonical string form.

use std::fmt;

/// Components of a possibly relative URL.
///
/// `None` means the component was not present in the input at all.
///
/// ```
/// use ssibox_core::UrlParts;
///
/// let parts = UrlParts::parse("https://example.org:8443/a/b?x=1#top");
/// assert_eq!(parts.scheme.as_deref(), Some("https"));
/// assert_eq!(parts.host.as_deref(), Some("example.org"));
/// assert_eq!(parts.port, Some(8443));
/// assert_eq!(parts.path.as_deref(), Some("/a/b"));
/// assert_eq!(parts.query.as_deref(), Some("x=1"));
/// assert_eq!(parts.fragment.as_deref(), Some("top"));
///
/// let parts = UrlParts::parse("nav.html");
/// assert_eq!(parts.host, None);
/// assert_eq!(parts.path.as_deref(), Some("nav.html"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    /// URL scheme, e.g. `http`.
    pub scheme: Option<String>,
    /// Host name or address. IPv6 literals keep their brackets.
    pub host: Option<String>,
    /// Explicit port.
    pub port: Option<u16>,
    /// Path, absolute or relative.
    pub path: Option<String>,
    /// Query string without the leading `?`.
    pub query: Option<String>,
    /// Fragment without the leading `#`.
    pub fragment: Option<String>,
}

impl UrlParts {
    /// Splits `input` into its components using generic URI syntax.
    ///
    /// Never fails. A scheme is only recognised before the first `:` when it
    /// is a valid scheme name, an authority only after `//`. User
    /// information in the authority is dropped. Empty components are treated
    /// as absent.
    pub fn parse(input: &str) -> Self {
        let mut parts = UrlParts::default();

        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, non_empty(fragment)),
            None => (input, None),
        };
        parts.fragment = fragment;

        let (mut rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, non_empty(query)),
            None => (rest, None),
        };
        parts.query = query;

        if let Some((scheme, after)) = rest.split_once(':')
            && is_scheme(scheme)
        {
            parts.scheme = Some(scheme.to_ascii_lowercase());
            rest = after;
        }

        if let Some(after) = rest.strip_prefix("//") {
            let (authority, path) = match after.find('/') {
                Some(idx) => after.split_at(idx),
                None => (after, ""),
            };
            let (host, port) = split_authority(authority);
            parts.host = host;
            parts.port = port;
            rest = path;
        }

        parts.path = non_empty(rest);
        parts
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn split_authority(authority: &str) -> (Option<String>, Option<u16>) {
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_userinfo, host_port)| host_port);

    let (host, port) = if host_port.starts_with('[') {
        // IPv6 literal: the port separator can only follow the closing bracket.
        match host_port.find(']') {
            Some(end) => {
                let (host, tail) = host_port.split_at(end + 1);
                (host, tail.strip_prefix(':'))
            }
            None => (host_port, None),
        }
    } else {
        match host_port.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };

    let port = port.and_then(|port| port.parse::<u16>().ok());
    (non_empty(host), port)
}

/// A fully qualified URL.
///
/// Renders as `scheme://host[:port]path[?query][#fragment]`, the port only
/// when it was explicitly present in the include target.
///
/// ```
/// use ssibox_core::ResolvedUrl;
///
/// let url = ResolvedUrl {
///     scheme: "http".into(),
///     host: "example.org".into(),
///     port: None,
///     path: "/foo".into(),
///     query: Some("format=partial".into()),
///     fragment: None,
/// };
/// assert_eq!(url.to_string(), "http://example.org/foo?format=partial");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    /// URL scheme.
    pub scheme: String,
    /// Host name or address.
    pub host: String,
    /// Explicit port.
    pub port: Option<u16>,
    /// Absolute path, or the relative path built from the request context.
    pub path: String,
    /// Query string without the leading `?`.
    pub query: Option<String>,
    /// Fragment without the leading `#`.
    pub fragment: Option<String>,
}

impl ResolvedUrl {
    /// Returns `true` for plain `http` URLs.
    pub fn is_plain_http(&self) -> bool {
        self.scheme.eq_ignore_ascii_case("http")
    }
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_relative_path() {
        let parts = UrlParts::parse("/foo");
        assert_eq!(
            parts,
            UrlParts {
                path: Some("/foo".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_parse_scheme_relative() {
        let parts = UrlParts::parse("//other.unl.edu/x?a=1");
        assert_eq!(parts.scheme, None);
        assert_eq!(parts.host.as_deref(), Some("other.unl.edu"));
        assert_eq!(parts.path.as_deref(), Some("/x"));
        assert_eq!(parts.query.as_deref(), Some("a=1"));
    }

    #[test]
    fn test_parse_host_only() {
        let parts = UrlParts::parse("http://example.org");
        assert_eq!(parts.host.as_deref(), Some("example.org"));
        assert_eq!(parts.path, None);
    }

    #[test]
    fn test_parse_empty_query_and_fragment_are_absent() {
        let parts = UrlParts::parse("/a?#");
        assert_eq!(parts.query, None);
        assert_eq!(parts.fragment, None);
    }

    #[test]
    fn test_parse_userinfo_and_ipv6() {
        let parts = UrlParts::parse("http://user:secret@[::1]:8080/x");
        assert_eq!(parts.host.as_deref(), Some("[::1]"));
        assert_eq!(parts.port, Some(8080));
        assert_eq!(parts.path.as_deref(), Some("/x"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(UrlParts::parse(""), UrlParts::default());
    }

    #[test]
    fn test_relative_path_with_colon_is_not_a_scheme() {
        let parts = UrlParts::parse("1:2/x");
        assert_eq!(parts.scheme, None);
        assert_eq!(parts.path.as_deref(), Some("1:2/x"));
    }
}
