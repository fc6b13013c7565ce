//! Delegating includes to the edge layer.
//!
//! When an ESI-capable proxy sits in front of this server and the include
//! points back at this same server, fetching it here would make the request
//! pass through the proxy twice. Instead the directive becomes an
//! `<esi:include>` tag and the proxy assembles the page.

use std::collections::BTreeSet;
use std::net::IpAddr;

use async_trait::async_trait;
use ssibox_core::{RequestContext, ResolvedUrl};
use tracing::debug;

/// Looks up the addresses of a host name.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Addresses `host` resolves to, `None` if it does not resolve.
    async fn lookup(&self, host: &str) -> Option<BTreeSet<IpAddr>>;
}

/// [`HostResolver`] backed by the system resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct DnsResolver;

#[async_trait]
impl HostResolver for DnsResolver {
    async fn lookup(&self, host: &str) -> Option<BTreeSet<IpAddr>> {
        let host = host.trim_start_matches('[').trim_end_matches(']');
        match tokio::net::lookup_host((host, 0)).await {
            Ok(addrs) => {
                let addrs: BTreeSet<_> = addrs.map(|addr| addr.ip()).collect();
                (!addrs.is_empty()).then_some(addrs)
            }
            Err(error) => {
                debug!(host, %error, "host lookup failed");
                None
            }
        }
    }
}

#[async_trait]
impl<R> HostResolver for std::sync::Arc<R>
where
    R: HostResolver + ?Sized,
{
    async fn lookup(&self, host: &str) -> Option<BTreeSet<IpAddr>> {
        (**self).lookup(host).await
    }
}

/// Decides per include whether the edge layer should fetch it.
#[derive(Debug, Clone)]
pub struct EdgeDecider<R> {
    enabled: bool,
    resolver: R,
}

impl<R> EdgeDecider<R>
where
    R: HostResolver,
{
    /// Creates a decider. Nothing is delegated unless `enabled`.
    pub fn new(enabled: bool, resolver: R) -> Self {
        Self { enabled, resolver }
    }

    /// Returns `true` when all of these hold:
    ///
    /// - delegation is enabled
    /// - the inbound request came through the edge layer
    /// - `url` is plain `http`
    /// - `url`'s host resolves to the same addresses as the inbound host
    ///
    /// Address comparison is only as good as DNS at the time of the check.
    pub async fn should_delegate(&self, url: &ResolvedUrl, ctx: &RequestContext) -> bool {
        if !self.enabled || !ctx.via_edge() || !url.is_plain_http() {
            return false;
        }
        if url.host.eq_ignore_ascii_case(ctx.host()) {
            return true;
        }
        let Some(target) = self.resolver.lookup(&url.host).await else {
            return false;
        };
        self.resolver
            .lookup(ctx.host())
            .await
            .is_some_and(|current| current == target)
    }
}

/// Tag the edge layer replaces with the content of `url`.
///
/// ```
/// use ssibox::edge::esi_include;
/// use ssibox_core::ResolvedUrl;
///
/// let url = ResolvedUrl {
///     scheme: "http".into(),
///     host: "example.org".into(),
///     port: None,
///     path: "/a".into(),
///     query: Some("x=1&y=2".into()),
///     fragment: None,
/// };
/// assert_eq!(
///     esi_include(&url),
///     r#"<esi:include src="http://example.org/a?x=1&amp;y=2"/>"#
/// );
/// ```
pub fn esi_include(url: &ResolvedUrl) -> String {
    let src = url.to_string();
    format!(
        "<esi:include src=\"{}\"/>",
        html_escape::encode_quoted_attribute(&src)
    )
}
