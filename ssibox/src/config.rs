//! Engine configuration.
//!
//! Every field has a default, so an empty document is a valid
//! configuration. Durations use humantime notation (`5s`, `500ms`).
//!
//! ```
//! use std::time::Duration;
//! use ssibox::IncludeConfig;
//!
//! let config = IncludeConfig::from_yaml(
//!     r#"
//! timeout: 2s
//! federation_suffix: example.edu
//! edge:
//!   enabled: true
//! shared:
//!   max_capacity: 500
//!   format: Bincode
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.timeout, Duration::from_secs(2));
//! assert_eq!(config.max_depth, 3);
//! assert!(config.edge.enabled);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use ssibox_backend::ValueFormat;
use ssibox_moka::MokaBackend;

use crate::error::ConfigError;

/// Settings of an [`Includer`](crate::Includer).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IncludeConfig {
    /// How long a single fetch may take.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Deepest include level that is still fetched.
    pub max_depth: u32,
    /// Hosts ending with this suffix are asked for a partial rendering.
    /// Empty disables the rewrite.
    pub federation_suffix: String,
    /// Query parameter appended for federated hosts.
    pub partial_query: String,
    /// Prefix of shared-tier cache keys.
    pub namespace: String,
    /// Edge delegation.
    pub edge: EdgeConfig,
    /// Shared tier.
    pub shared: SharedConfig,
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_depth: 3,
            federation_suffix: "unl.edu".to_owned(),
            partial_query: "format=partial".to_owned(),
            namespace: "urlGetContents".to_owned(),
            edge: EdgeConfig::default(),
            shared: SharedConfig::default(),
        }
    }
}

impl IncludeConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_saphyr::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        if self.shared.max_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Edge delegation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EdgeConfig {
    /// Whether an edge layer able to process `<esi:include>` sits in front
    /// of this server.
    pub enabled: bool,
}

/// Shared tier settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SharedConfig {
    /// Maximum number of cached includes.
    pub max_capacity: u64,
    /// Serialization of cached includes.
    pub format: ValueFormat,
    /// Name used in logs and metrics.
    pub label: Option<String>,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            format: ValueFormat::default(),
            label: None,
        }
    }
}

impl SharedConfig {
    /// Builds an in-memory shared tier with these settings.
    pub fn build_backend(&self) -> MokaBackend {
        let mut builder = MokaBackend::builder()
            .max_entries(self.max_capacity)
            .value_format(self.format);
        if let Some(label) = &self.label {
            builder = builder.label(label.clone());
        }
        builder.build()
    }
}
