#![warn(missing_docs)]
//! # ssibox-reqwest
//!
//! HTTP [`Fetcher`](ssibox_core::Fetcher) for ssibox built on
//! [reqwest](https://docs.rs/reqwest) and
//! [reqwest-middleware](https://docs.rs/reqwest-middleware).
//!
//! Every include fetch is a `GET` that announces its depth in the
//! `X-Depth-Guard` header and gives up after a timeout (5 seconds unless
//! configured otherwise). Any transport error, timeout or non-success
//! status turns into a failed [`FetchResult`](ssibox_core::FetchResult).
//!
//! ## Quick start
//!
//! ```no_run
//! use ssibox_core::{Depth, FetchOptions, Fetcher};
//! use ssibox_reqwest::ReqwestFetcher;
//!
//! # async fn example() {
//! let fetcher = ReqwestFetcher::new(reqwest::Client::new());
//! let result = fetcher
//!     .fetch("http://example.org/nav", FetchOptions::new(Depth::new(1)))
//!     .await;
//! println!("{}", result.text());
//! # }
//! ```
//!
//! ## Middleware
//!
//! Retries, tracing or any other `reqwest-middleware` layer can be put in
//! front of the fetcher with [`ReqwestFetcher::with_middleware`].

mod error;
mod fetcher;

pub use error::FetchError;
pub use fetcher::{DEFAULT_TIMEOUT, ReqwestFetcher};
