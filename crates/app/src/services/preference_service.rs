//! Preference service — keeps the stored host preference and the
//! [`HostCache`] in step.

use ventlink_domain::address::validate_ip_preference;
use ventlink_domain::error::PreferenceError;

use crate::host_cache::HostCache;
use crate::ports::PreferenceStore;

/// Application service for the user's host preference.
pub struct PreferenceService<S> {
    store: S,
    cache: HostCache,
}

impl<S: PreferenceStore> PreferenceService<S> {
    /// Create a new service writing through to `store` and `cache`.
    pub fn new(store: S, cache: HostCache) -> Self {
        Self { store, cache }
    }

    /// Seed the host cache from the stored preference.
    ///
    /// Returns the stored value (possibly blank).
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> String {
        let ip_address = self.store.ip_address().await;
        tracing::debug!(%ip_address, "read ip address from preferences");
        self.cache.set(ip_address.as_str());
        ip_address
    }

    /// Validate, persist and apply a new host preference.
    ///
    /// Blank input clears the preference so the next operation falls back
    /// to discovery.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Invalid`] for anything that is neither
    /// blank nor a well-formed IP address, and [`PreferenceError::Storage`]
    /// when the store cannot persist it. The host cache is left untouched in
    /// both cases.
    #[tracing::instrument(skip(self))]
    pub async fn set_ip_address(&self, input: &str) -> Result<(), PreferenceError> {
        let ip_address = validate_ip_preference(input)?;
        tracing::debug!(%ip_address, "writing ip address to preferences");
        self.store.set_ip_address(ip_address.clone()).await?;
        self.cache.set(ip_address);
        Ok(())
    }
}
