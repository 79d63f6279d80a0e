//! Network address of an air unit.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// TCP port the unit listens on.
pub const DEFAULT_PORT: u16 = 30046;

/// A resolved unit host plus the port to reach it on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceAddress {
    host: String,
    port: u16,
}

impl DeviceAddress {
    /// Address on [`DEFAULT_PORT`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankHost`] when `host` is blank.
    pub fn new(host: impl Into<String>) -> Result<Self, ValidationError> {
        let host = host.into().trim().to_string();
        if host.is_empty() {
            return Err(ValidationError::BlankHost);
        }
        Ok(Self {
            host,
            port: DEFAULT_PORT,
        })
    }

    /// Same host on a different port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => write!(f, "[{ip}]:{}", self.port),
            _ => write!(f, "{}:{}", self.host, self.port),
        }
    }
}

/// Validate a user-supplied host preference.
///
/// Blank input is accepted and means "use discovery"; anything else must be
/// a well-formed IP address. Returns the trimmed value.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidIpAddress`] otherwise.
pub fn validate_ip_preference(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.parse::<IpAddr>().is_ok() {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::InvalidIpAddress(input.to_string()))
    }
}
