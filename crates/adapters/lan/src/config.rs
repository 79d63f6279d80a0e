//! LAN adapter configuration.

use std::net::IpAddr;
use std::time::Duration;

use serde::Deserialize;

/// UDP port the unit listens on for discovery queries.
pub const DISCOVERY_PORT: u16 = 30045;

/// Timeouts of the TCP register connection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Maximum time to establish the connection, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Maximum time to wait for a response frame, in milliseconds.
    pub read_timeout_ms: u64,
}

impl ConnectionConfig {
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
        }
    }
}

/// Broadcast discovery settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Broadcast addresses the query is sent to, one after the other.
    ///
    /// Empty means every local interface's subnet broadcast address.
    pub broadcast_addrs: Vec<IpAddr>,
    /// Destination UDP port of the query.
    pub port: u16,
    /// How long to wait for replies on each address, in milliseconds.
    pub timeout_ms: u64,
}

impl DiscoveryConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            broadcast_addrs: Vec::new(),
            port: DISCOVERY_PORT,
            timeout_ms: 500,
        }
    }
}
