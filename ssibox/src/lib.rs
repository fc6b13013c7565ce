#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! # ssibox
//!
//! Resolves `[[include-url:"…"]]` directives embedded in a document.
//!
//! For every directive the [`Includer`]:
//!
//! 1. resolves the target into an absolute URL ([`UrlResolver`])
//! 2. either hands the include to an ESI-capable edge layer
//!    ([`edge::EdgeDecider`]) or fetches it itself
//! 3. refuses to fetch beyond the nesting limit ([`RecursionGuard`])
//! 4. serves and stores fetched content through a request-local tier and a
//!    shared tier, following the origin's `Cache-Control`, `Age` and
//!    `Expires` headers
//!
//! The result replaces the directive between
//! `<!-- Begin content from URL -->` and `<!-- End content from URL -->`
//! markers. Resolution never fails; unreachable includes become empty.
//!
//! ## Quick start
//!
//! ```no_run
//! use ssibox::{IncludeConfig, Includer};
//! use ssibox_http::{ResponseDirectives, request_context};
//! use ssibox_reqwest::ReqwestFetcher;
//!
//! # async fn handle(request: http::Request<String>) -> http::Response<String> {
//! let config = IncludeConfig::from_yaml("timeout: 3s").unwrap();
//! let includer = Includer::builder()
//!     .fetcher(ReqwestFetcher::new(reqwest::Client::new()))
//!     .shared(config.shared.build_backend())
//!     .config(config)
//!     .build();
//!
//! let (parts, body) = request.into_parts();
//! let ctx = request_context(&parts).base_path("/").build();
//!
//! let mut directives = ResponseDirectives::new();
//! let page = includer.process(&body, &ctx, &mut directives).await;
//!
//! let mut response = http::Response::new(page);
//! directives.apply(response.headers_mut());
//! response
//! # }
//! ```
//!
//! ## Feature flags
//!
//! - `metrics`: counters and histograms through the
//!   [metrics](https://docs.rs/metrics) facade

pub mod config;
pub mod edge;
pub mod error;
pub mod guard;
mod includer;
pub mod metrics;
pub mod parser;
pub mod resolver;

pub use config::{EdgeConfig, IncludeConfig, SharedConfig};
pub use edge::{DnsResolver, EdgeDecider, HostResolver};
pub use error::{ConfigError, IncludeError};
pub use guard::RecursionGuard;
pub use includer::{Includer, IncluderBuilder, NotSet};
pub use resolver::UrlResolver;
