//! Shared include cache backed by [Moka](https://github.com/moka-rs/moka).
//!
//! ```
//! use ssibox_moka::MokaBackend;
//!
//! let backend = MokaBackend::builder().max_entries(10_000).build();
//! ```
#![warn(missing_docs)]

mod backend;
mod builder;

pub use backend::MokaBackend;
pub use builder::{ByteCapacity, EntryCapacity, MokaBackendBuilder, NoCapacity};
pub use moka::policy::EvictionPolicy;
