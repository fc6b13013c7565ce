//! Request context the engine resolves includes against.
//!
//! The context describes the inbound request whose page is being rendered:
//! where relative include targets are anchored, how deep in an include chain
//! the request already is, and whether it reached us through the edge layer.
//! The engine only ever reads it.

use smol_str::SmolStr;

use crate::Depth;

/// Read-only view of the inbound request.
///
/// # Example
///
/// ```
/// use ssibox_core::{Depth, RequestContext};
///
/// let ctx = RequestContext::builder("example.org")
///     .base_path("/site")
///     .request_path("page")
///     .build();
///
/// assert_eq!(ctx.scheme(), "http");
/// assert_eq!(ctx.host(), "example.org");
/// assert_eq!(ctx.depth(), Depth::ZERO);
/// assert!(!ctx.use_base_tag());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    secure: bool,
    host: SmolStr,
    base_path: String,
    request_path: String,
    use_base_tag: bool,
    depth: Depth,
    via_edge: bool,
}

impl RequestContext {
    /// Starts building a context for a request served as `host`.
    pub fn builder(host: impl Into<SmolStr>) -> RequestContextBuilder {
        RequestContextBuilder::new(host)
    }

    /// `https` when the inbound connection is secure, `http` otherwise.
    pub fn scheme(&self) -> &'static str {
        if self.secure { "https" } else { "http" }
    }

    /// Server name of the inbound request.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Base path of the site, prepended to relative include targets.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Path of the page being rendered relative to the base path, without a
    /// leading slash (`news/2024`).
    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    /// Whether pages are rendered with a `<base>` tag, in which case relative
    /// targets are anchored at the base path instead of the current page.
    pub fn use_base_tag(&self) -> bool {
        self.use_base_tag
    }

    /// Include depth announced by the inbound request.
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Whether the inbound request was forwarded by the edge layer.
    pub fn via_edge(&self) -> bool {
        self.via_edge
    }
}

/// Builder for [`RequestContext`].
#[derive(Debug, Clone)]
pub struct RequestContextBuilder {
    inner: RequestContext,
}

impl RequestContextBuilder {
    fn new(host: impl Into<SmolStr>) -> Self {
        Self {
            inner: RequestContext {
                secure: false,
                host: host.into(),
                base_path: String::from("/"),
                request_path: String::new(),
                use_base_tag: false,
                depth: Depth::ZERO,
                via_edge: false,
            },
        }
    }

    /// Marks the inbound connection as secure (`https`).
    pub fn secure(mut self, secure: bool) -> Self {
        self.inner.secure = secure;
        self
    }

    /// Sets the site base path. Defaults to `/`.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.inner.base_path = base_path.into();
        self
    }

    /// Sets the path of the page being rendered.
    pub fn request_path(mut self, request_path: impl Into<String>) -> Self {
        self.inner.request_path = request_path.into();
        self
    }

    /// Enables `<base>` tag anchoring of relative targets.
    pub fn use_base_tag(mut self, use_base_tag: bool) -> Self {
        self.inner.use_base_tag = use_base_tag;
        self
    }

    /// Sets the inbound include depth.
    pub fn depth(mut self, depth: Depth) -> Self {
        self.inner.depth = depth;
        self
    }

    /// Marks the inbound request as forwarded by the edge layer.
    pub fn via_edge(mut self, via_edge: bool) -> Self {
        self.inner.via_edge = via_edge;
        self
    }

    /// Finishes the context.
    pub fn build(self) -> RequestContext {
        self.inner
    }
}
