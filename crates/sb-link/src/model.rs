//! Descriptor produced by link adapters, and their error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::DecodeFailure;

/// Protocol-specific fields not shared across adapters (`uuid`, `tls`, ...).
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Fatal link decoding failures; everything else is defaulted.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The payload segment is not valid base64.
    #[error("payload base64 decode failed: {0}")]
    PayloadDecode(#[source] DecodeFailure),
    /// The decoded payload is not a JSON object.
    #[error("payload is not a JSON object: {0}")]
    PayloadFormat(#[source] serde_json::Error),
}

/// One outbound server, normalized from a share link.
///
/// Serialized with the field names the node store uses (`tag`, `type`,
/// `server`, `server_port`, `extra`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    /// Human readable name, never empty.
    #[serde(rename = "tag")]
    pub display_name: String,
    /// Protocol tag, e.g. `vmess`.
    #[serde(rename = "type")]
    pub protocol_kind: String,
    /// Server host name or IP literal.
    #[serde(rename = "server")]
    pub server_address: String,
    /// Zero when the link carried no usable port.
    pub server_port: u16,
    /// Protocol-specific fields.
    #[serde(rename = "extra", default)]
    pub attributes: Attributes,
}

impl ConnectionDescriptor {
    /// `address:port`, the name of last resort.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.server_address, self.server_port)
    }

    /// Top-level attribute lookup.
    pub fn attr(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    /// Nested lookup, e.g. `attr_path(&["tls", "server_name"])`.
    pub fn attr_path(&self, path: &[&str]) -> Option<&serde_json::Value> {
        let (first, rest) = path.split_first()?;
        let mut cur = self.attributes.get(*first)?;
        for key in rest {
            cur = cur.get(*key)?;
        }
        Some(cur)
    }
}
