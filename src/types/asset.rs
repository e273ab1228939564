//! Scanned asset records and their primary key.
//!
//! A `ScannedAsset` is what a prober hands to the cache: one `(host, port)`
//! endpoint plus the protocol, state code, and capture time it observed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::state::ProbeState;

/// A discovered endpoint with its probe metadata.
///
/// The `(host, port)` pair is the identity of the record. Writing a record
/// whose key already exists replaces every other field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedAsset {
    /// Hostname or IP address.
    pub host: String,
    /// Port number. Zero is rejected per record when writing.
    pub port: u16,
    /// Observed transport or application protocol.
    #[serde(default)]
    pub protocol: Option<String>,
    /// Probe outcome code.
    pub state: i32,
    /// When the record was captured.
    pub timestamp: DateTime<Utc>,
}

impl ScannedAsset {
    /// Create a new asset record stamped with the current time.
    pub fn new(host: impl Into<String>, port: u16, state: impl Into<i32>) -> Self {
        Self {
            host: host.into(),
            port,
            protocol: None,
            state: state.into(),
            timestamp: Utc::now(),
        }
    }

    /// Set the observed protocol.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Set the capture timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The primary key of this record.
    pub fn key(&self) -> AssetKey {
        AssetKey::new(self.host.clone(), self.port)
    }

    /// The state code interpreted as a well-known probe state, if it is one.
    pub fn probe_state(&self) -> Option<ProbeState> {
        ProbeState::from_code(self.state)
    }

    /// Check that the record can be written to the cache.
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.host.trim().is_empty() {
            return Err(AssetError::EmptyHost);
        }
        if self.port == 0 {
            return Err(AssetError::InvalidPort(self.port));
        }
        Ok(())
    }
}

impl From<AssetKey> for ScannedAsset {
    /// A key-only record, sufficient for deletion.
    fn from(key: AssetKey) -> Self {
        Self::new(key.host, key.port, ProbeState::Closed)
    }
}

/// The `(host, port)` primary key of a cached asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetKey {
    pub host: String,
    pub port: u16,
}

impl AssetKey {
    /// Create a new key.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for AssetKey {
    type Err = AssetError;

    /// Parse `host:port`, or `[v6addr]:port` for IPv6 hosts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| AssetError::InvalidKey(s.to_string()))?;

        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);

        let port: u16 = port
            .parse()
            .map_err(|_| AssetError::InvalidKey(s.to_string()))?;

        let key = Self::new(host, port);
        if key.host.is_empty() {
            return Err(AssetError::EmptyHost);
        }
        if key.port == 0 {
            return Err(AssetError::InvalidPort(0));
        }
        Ok(key)
    }
}

/// Reasons a single asset record cannot be written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("host must not be empty")]
    EmptyHost,
    #[error("port {0} is out of valid range (1-65535)")]
    InvalidPort(u16),
    #[error("invalid asset key '{0}', expected HOST:PORT")]
    InvalidKey(String),
}
