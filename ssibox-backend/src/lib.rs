//! Storage for fetched includes.
//!
//! Two tiers hold fetched content:
//!
//! - the **shared tier**, any [`Backend`] (the `ssibox-moka` crate provides
//!   the in-memory one). It outlives a single rendering, is read and written
//!   concurrently by unrelated invocations and only ever holds content the
//!   origin declared cacheable, together with its expiry.
//! - the **request-local tier**, a [`LocalBackend`] owned by one rendering.
//!   It memoizes everything else, fetch failures included, so a URL included
//!   twice on one page is fetched once.
//!
//! [`LayeredStore`] combines both and implements the lookup order and write
//! policy.
mod backend;
mod error;
pub mod format;
pub mod layered;
pub mod local;
mod response;

pub use backend::{Backend, BackendResult, DeleteStatus};
pub use error::BackendError;
pub use format::{FormatError, ValueFormat};
pub use layered::{LayeredStore, Lookup, Placement, Tier};
pub use local::LocalBackend;
pub use response::CachedResponse;
