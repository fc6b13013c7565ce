#![warn(missing_docs)]
//! HTTP side of ssibox.
//!
//! - [`headers`]: header names and messages of the include protocol
//! - [`policy`]: turns origin response headers into a [`CachePolicy`]
//! - [`ResponseDirectives`]: a [`HostResponse`] that records what the
//!   engine asked of the enclosing page, ready to apply to an outbound
//!   response
//! - [`request_context`]: builds a [`RequestContext`] from inbound request
//!   parts
//!
//! [`CachePolicy`]: ssibox_core::CachePolicy
//! [`HostResponse`]: ssibox_core::HostResponse
//! [`RequestContext`]: ssibox_core::RequestContext

mod context;
mod directives;
pub mod headers;
pub mod policy;

pub use context::request_context;
pub use directives::ResponseDirectives;
pub use policy::cache_policy;
