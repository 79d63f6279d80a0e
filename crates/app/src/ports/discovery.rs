//! Discovery port — find a unit on the local network.

use std::future::Future;

/// One-shot network probe for a unit.
pub trait DiscoveryProbe: Send + Sync {
    /// Probe the local network and return the first responder's host.
    ///
    /// Returns `None` when nothing answered within the probe's timeout.
    /// Socket failures are reported as `None` too; the caller treats both as
    /// a resolution failure.
    fn probe(&self) -> impl Future<Output = Option<String>> + Send;
}
