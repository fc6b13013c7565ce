#![warn(missing_docs)]
//! # ssibox-core
//!
//! Core types shared by the ssibox crates.
//!
//! ssibox resolves `[[include-url:"…"]]` directives embedded in a document by
//! fetching the referenced content over HTTP, bounding recursive includes and
//! caching fetched content in two tiers. This crate holds the data model that
//! the other crates pass between each other:
//!
//! - **Parse** results ([`Directive`])
//! - **Resolve** results ([`UrlParts`], [`ResolvedUrl`]) and the inbound
//!   [`RequestContext`] they are resolved against
//! - **Guard** state ([`Depth`])
//! - **Fetch** seam ([`Fetcher`], [`FetchResult`], [`FetchOptions`])
//! - **Cache** vocabulary ([`CacheKey`], [`CacheValue`], [`CachePolicy`])
//! - **Host** seam ([`HostResponse`]) used to drive the enclosing page's cache
//!   lifetime and response headers

pub mod context;
pub mod depth;
pub mod directive;
pub mod fetch;
pub mod host;
pub mod key;
pub mod label;
pub mod policy;
pub mod url;
pub mod value;

pub use context::{RequestContext, RequestContextBuilder};
pub use depth::Depth;
pub use directive::Directive;
pub use fetch::{FetchOptions, FetchResult, Fetcher};
pub use host::HostResponse;
pub use key::CacheKey;
pub use label::BackendLabel;
pub use policy::{CachePolicy, Cacheability};
pub use url::{ResolvedUrl, UrlParts};
pub use value::CacheValue;

/// Raw byte data type used for serialized cache values.
/// Using `Bytes` provides efficient zero-copy cloning via reference counting.
pub type Raw = bytes::Bytes;
