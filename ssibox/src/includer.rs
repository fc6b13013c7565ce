//! Resolution of every directive in a text.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use ssibox_backend::{Backend, LayeredStore, LocalBackend};
use ssibox_core::{
    CacheKey, CachePolicy, Directive, FetchOptions, Fetcher, HostResponse, RequestContext,
    ResolvedUrl,
};
use ssibox_http::cache_policy;
use ssibox_http::headers::{
    DEPTH_ERROR_HEADER, DEPTH_LIMIT_MESSAGE, ESI_ENABLED, ESI_HEADER, NESTED_DEPTH_MESSAGE,
};
use tracing::{debug, error, warn};

use crate::edge::{self, DnsResolver, EdgeDecider, HostResolver};
use crate::guard::{self, RecursionGuard};
use crate::{IncludeConfig, UrlResolver, metrics, parser};

/// Replaces include directives with the content they point at.
///
/// Cloning is cheap; clones share the fetcher, the shared tier and the
/// configuration. Independent invocations of [`process`](Self::process)
/// may run concurrently.
///
/// ```no_run
/// use ssibox::{IncludeConfig, Includer};
/// use ssibox_core::RequestContext;
/// use ssibox_http::ResponseDirectives;
/// use ssibox_reqwest::ReqwestFetcher;
///
/// # async fn example() {
/// let config = IncludeConfig::default();
/// let includer = Includer::builder()
///     .fetcher(ReqwestFetcher::new(reqwest::Client::new()).timeout(config.timeout))
///     .shared(config.shared.build_backend())
///     .config(config)
///     .build();
///
/// let ctx = RequestContext::builder("www.example.org").build();
/// let mut directives = ResponseDirectives::new();
/// let page = includer
///     .process(r#"<body>[[include-url:"/nav"]]</body>"#, &ctx, &mut directives)
///     .await;
/// # }
/// ```
pub struct Includer<F, B, R = DnsResolver> {
    inner: Arc<Inner<F, B, R>>,
}

struct Inner<F, B, R> {
    config: IncludeConfig,
    urls: UrlResolver,
    guard: RecursionGuard,
    edge: EdgeDecider<R>,
    fetcher: F,
    shared: B,
}

impl<F, B, R> Clone for Includer<F, B, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F, B, R> std::fmt::Debug for Includer<F, B, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Includer")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl Includer<NotSet, NotSet, DnsResolver> {
    /// Starts building an includer with the default configuration and the
    /// system DNS resolver.
    pub fn builder() -> IncluderBuilder<NotSet, NotSet, DnsResolver> {
        IncluderBuilder::new()
    }
}

impl<F, B, R> Includer<F, B, R>
where
    F: Fetcher,
    B: Backend,
    R: HostResolver,
{
    /// The configuration in use.
    pub fn config(&self) -> &IncludeConfig {
        &self.inner.config
    }

    /// Replaces every directive in `text` and returns the result.
    ///
    /// Directives are resolved in order of appearance. Identical directive
    /// texts are resolved once and share their replacement. Instructions for
    /// the enclosing page (cacheability, lifetime, headers) go to `host`.
    /// Never fails: problems end up as empty or sentinel content.
    pub async fn process<H>(&self, text: &str, ctx: &RequestContext, host: &mut H) -> String
    where
        H: HostResponse + ?Sized,
    {
        let directives = parser::parse(text);
        if directives.is_empty() {
            return text.to_owned();
        }
        debug!(count = directives.len(), "resolving include directives");

        let mut invocation = Invocation {
            inner: &self.inner,
            ctx,
            local: LocalBackend::new(),
        };
        let mut replacements: HashMap<&str, String> = HashMap::new();
        for directive in &directives {
            if !replacements.contains_key(directive.raw()) {
                let replacement = invocation.resolve(directive, host).await;
                replacements.insert(directive.raw(), replacement);
            }
        }

        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        for directive in &directives {
            let span = directive.span();
            output.push_str(&text[cursor..span.start]);
            if let Some(replacement) = replacements.get(directive.raw()) {
                output.push_str(replacement);
            }
            cursor = span.end;
        }
        output.push_str(&text[cursor..]);
        output
    }
}

/// State of one [`Includer::process`] call.
///
/// Owns the request-local tier, which is dropped with it.
struct Invocation<'a, F, B, R> {
    inner: &'a Inner<F, B, R>,
    ctx: &'a RequestContext,
    local: LocalBackend,
}

impl<F, B, R> Invocation<'_, F, B, R>
where
    F: Fetcher,
    B: Backend,
    R: HostResolver,
{
    #[tracing::instrument(skip_all, fields(directive = directive.target()))]
    async fn resolve<H>(&mut self, directive: &Directive, host: &mut H) -> String
    where
        H: HostResponse + ?Sized,
    {
        metrics::record_directive();
        let url = self.inner.urls.resolve(directive.target(), self.ctx);

        let content = if self.inner.edge.should_delegate(&url, self.ctx).await {
            debug!(%url, "delegating include to the edge layer");
            metrics::record_edge_delegation();
            host.insert_header(ESI_HEADER, ESI_ENABLED);
            edge::esi_include(&url)
        } else {
            self.include(&url, host).await
        };

        format!("\n<!-- Begin content from {url} -->\n{content}\n<!-- End content from {url} -->\n")
    }

    async fn include<H>(&mut self, url: &ResolvedUrl, host: &mut H) -> String
    where
        H: HostResponse + ?Sized,
    {
        let url = url.to_string();
        let depth = match self.inner.guard.check(self.ctx.depth(), &url) {
            Ok(depth) => depth,
            Err(err) => {
                error!(error = %err, "recursion depth limit reached");
                metrics::record_depth_limit();
                host.insert_header(DEPTH_ERROR_HEADER, DEPTH_LIMIT_MESSAGE);
                return guard::sentinel(&url);
            }
        };

        let inner = self.inner;
        let key = CacheKey::new(inner.config.namespace.as_str(), url.as_str());
        let mut store = LayeredStore::new(&mut self.local, &inner.shared);

        let result = match store.lookup(&key, Utc::now(), host).await {
            Some(hit) => {
                metrics::record_cache_hit(hit.tier);
                hit.result
            }
            None => {
                metrics::record_cache_miss();
                let options = FetchOptions::new(depth).timeout(inner.config.timeout);
                let started = Instant::now();
                let result = inner.fetcher.fetch(&url, options).await;
                metrics::record_fetch(started.elapsed(), result.succeeded());

                let now = Utc::now();
                let policy = if result.succeeded() {
                    cache_policy(&result.headers, now)
                } else {
                    debug!(%url, "include fetch produced no content");
                    CachePolicy::not_cacheable()
                };
                let placement = store.store(key, result.clone(), &policy, now, host).await;
                debug!(%url, ?policy, ?placement, "include fetched");
                result
            }
        };

        if result.headers.contains_key(DEPTH_ERROR_HEADER) {
            warn!(%url, "included URL reached the recursion depth limit");
            host.insert_header(DEPTH_ERROR_HEADER, NESTED_DEPTH_MESSAGE);
        }

        result.text()
    }
}

/// Marker for builder fields that have not been set.
///
/// Seeing `NotSet` in a compiler error means the corresponding builder
/// method still has to be called.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotSet;

/// Builder for [`Includer`].
pub struct IncluderBuilder<F, B, R> {
    config: IncludeConfig,
    fetcher: F,
    shared: B,
    resolver: R,
}

impl IncluderBuilder<NotSet, NotSet, DnsResolver> {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: IncludeConfig::default(),
            fetcher: NotSet,
            shared: NotSet,
            resolver: DnsResolver,
        }
    }
}

impl Default for IncluderBuilder<NotSet, NotSet, DnsResolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, B, R> IncluderBuilder<F, B, R> {
    /// Replaces the configuration.
    pub fn config(mut self, config: IncludeConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the fetcher used on cache misses.
    pub fn fetcher<NewF>(self, fetcher: NewF) -> IncluderBuilder<NewF, B, R> {
        IncluderBuilder {
            config: self.config,
            fetcher,
            shared: self.shared,
            resolver: self.resolver,
        }
    }

    /// Sets the shared cache tier.
    pub fn shared<NewB>(self, shared: NewB) -> IncluderBuilder<F, NewB, R> {
        IncluderBuilder {
            config: self.config,
            fetcher: self.fetcher,
            shared,
            resolver: self.resolver,
        }
    }

    /// Sets the host resolver used for edge delegation.
    pub fn resolver<NewR>(self, resolver: NewR) -> IncluderBuilder<F, B, NewR> {
        IncluderBuilder {
            config: self.config,
            fetcher: self.fetcher,
            shared: self.shared,
            resolver,
        }
    }
}

impl<F, B, R> IncluderBuilder<F, B, R>
where
    F: Fetcher,
    B: Backend,
    R: HostResolver,
{
    /// Builds the includer.
    pub fn build(self) -> Includer<F, B, R> {
        let config = self.config;
        Includer {
            inner: Arc::new(Inner {
                urls: UrlResolver::from_config(&config),
                guard: RecursionGuard::new(config.max_depth),
                edge: EdgeDecider::new(config.edge.enabled, self.resolver),
                fetcher: self.fetcher,
                shared: self.shared,
                config,
            }),
        }
    }
}
