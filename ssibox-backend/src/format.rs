//! Value serialization formats.
//!
//! Shared-tier backends store bytes. [`ValueFormat`] turns a
//! [`CachedResponse`](crate::CachedResponse) into those bytes and back.
//!
//! | Format | Speed | Size | Human-readable |
//! |--------|-------|------|----------------|
//! | [`Json`](ValueFormat::Json) | Slow | Large | Yes |
//! | [`Bincode`](ValueFormat::Bincode) | Fast | Compact | No |

use bytes::Bytes;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use ssibox_core::Raw;
use thiserror::Error;

/// Serialization or deserialization failure.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Serialize(Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Deserialize(Box<dyn std::error::Error + Send + Sync>),
}

/// Serialization format for shared-tier values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueFormat {
    /// JSON via `serde_json`.
    #[default]
    Json,
    /// Bincode (standard configuration) via its serde integration.
    Bincode,
}

impl ValueFormat {
    /// Serializes `value`.
    pub fn serialize<T>(&self, value: &T) -> Result<Raw, FormatError>
    where
        T: Serialize,
    {
        let buf = match self {
            ValueFormat::Json => {
                serde_json::to_vec(value).map_err(|e| FormatError::Serialize(Box::new(e)))?
            }
            ValueFormat::Bincode => {
                bincode::serde::encode_to_vec(value, bincode::config::standard())
                    .map_err(|e| FormatError::Serialize(Box::new(e)))?
            }
        };
        Ok(Bytes::from(buf))
    }

    /// Deserializes a value previously produced by [`serialize`](Self::serialize).
    pub fn deserialize<T>(&self, data: &[u8]) -> Result<T, FormatError>
    where
        T: DeserializeOwned,
    {
        match self {
            ValueFormat::Json => {
                serde_json::from_slice(data).map_err(|e| FormatError::Deserialize(Box::new(e)))
            }
            ValueFormat::Bincode => {
                bincode::serde::decode_from_slice(data, bincode::config::standard())
                    .map(|(value, _read)| value)
                    .map_err(|e| FormatError::Deserialize(Box::new(e)))
            }
        }
    }
}
