//! # ventlink-adapter-lan
//!
//! LAN adapter — talks to the air unit over its TCP register protocol and
//! finds it with a UDP broadcast.
//!
//! ## Layers
//!
//! | Module | Role |
//! |--------|------|
//! | [`frame`] | request and response wire frames |
//! | [`controller`] | one connection per request, retried once |
//! | [`registers`] | where each property lives (configuration) |
//! | [`codec`] | raw field bytes to domain values |
//! | [`facade`] | [`AirUnit`](ventlink_app::ports::AirUnit) implementation over the above |
//! | [`discovery`] | broadcast probe |
//! | [`interfaces`] | subnet broadcast addresses of local interfaces |
//!
//! ## Dependency rule
//!
//! Depends on `ventlink-app` (ports) and `ventlink-domain` only.

pub mod codec;
mod config;
pub mod controller;
pub mod discovery;
mod error;
pub mod facade;
pub mod frame;
pub mod interfaces;
pub mod registers;

pub use config::{ConnectionConfig, DISCOVERY_PORT, DiscoveryConfig};
pub use controller::{ConnectionController, FrameTransport};
pub use discovery::UdpDiscovery;
pub use error::{FrameError, RegisterMapError};
pub use facade::RegisterFacade;
pub use registers::{Property, RegisterMap, RegisterSpec};

use std::sync::Arc;

use ventlink_app::ports::AirUnitConnector;
use ventlink_domain::address::DeviceAddress;

/// Builds a [`RegisterFacade`] over a fresh [`ConnectionController`] for
/// every resolved address.
#[derive(Debug, Clone)]
pub struct LanConnector {
    registers: Arc<RegisterMap>,
    connection: ConnectionConfig,
}

impl LanConnector {
    #[must_use]
    pub fn new(registers: RegisterMap, connection: ConnectionConfig) -> Self {
        Self {
            registers: Arc::new(registers),
            connection,
        }
    }
}

impl AirUnitConnector for LanConnector {
    type Unit = RegisterFacade<ConnectionController>;

    fn bind(&self, address: &DeviceAddress) -> Self::Unit {
        let controller = ConnectionController::with_timeouts(
            address.clone(),
            self.connection.connect_timeout(),
            self.connection.read_timeout(),
        );
        RegisterFacade::new(controller, Arc::clone(&self.registers))
    }
}
