//! Discovery service — resolves the unit's host.

use crate::host_cache::HostCache;
use crate::ports::DiscoveryProbe;

/// Resolves the unit host from, in order: a configured override, the
/// [`HostCache`], or a network probe.
///
/// Every successful resolution leaves the host in the cache. A failed probe
/// leaves the cache untouched.
pub struct DiscoveryService<P> {
    probe: P,
    cache: HostCache,
    override_host: Option<String>,
}

impl<P: DiscoveryProbe> DiscoveryService<P> {
    /// Create a service backed by `probe` and sharing `cache`.
    ///
    /// A blank `override_host` is treated as absent.
    pub fn new(probe: P, cache: HostCache, override_host: Option<String>) -> Self {
        let override_host = override_host
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty());
        Self {
            probe,
            cache,
            override_host,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &HostCache {
        &self.cache
    }

    /// Resolve the unit host.
    ///
    /// Returns `None` when nothing is configured, nothing is cached and the
    /// probe found no responder. No internal retry.
    #[tracing::instrument(skip(self))]
    pub async fn scan(&self) -> Option<String> {
        if let Some(host) = &self.override_host {
            tracing::debug!(%host, "using configured host override");
            self.cache.set(host.as_str());
            return Some(host.clone());
        }

        if let Some(host) = self.cache.get() {
            tracing::debug!(%host, "reusing cached host");
            return Some(host);
        }

        tracing::info!("no known host, probing local network");
        match self.probe.probe().await {
            Some(host) if !host.trim().is_empty() => {
                tracing::info!(%host, "air unit discovered");
                self.cache.set(host.as_str());
                Some(host)
            }
            _ => {
                tracing::info!("no air unit responded to discovery");
                None
            }
        }
    }
}
