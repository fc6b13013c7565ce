//! Error types.

use ssibox_core::Depth;
use thiserror::Error;

/// Why an include was not resolved.
///
/// These never escape [`Includer::process`](crate::Includer::process); they
/// are logged and turned into inline content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IncludeError {
    /// Fetching the include would nest deeper than allowed.
    #[error("include of {url} at depth {depth} exceeds the recursion limit")]
    RecursionLimitExceeded {
        /// Depth the fetch would have been issued at.
        depth: Depth,
        /// Resolved URL that was not fetched.
        url: String,
    },
}

/// Invalid engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be deserialized.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_saphyr::Error),
    /// `timeout` is zero.
    #[error("fetch timeout must be greater than zero")]
    ZeroTimeout,
    /// `namespace` is empty.
    #[error("cache namespace must not be empty")]
    EmptyNamespace,
    /// `shared.max_capacity` is zero.
    #[error("shared cache capacity must be greater than zero")]
    ZeroCapacity,
}
