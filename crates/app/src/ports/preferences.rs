//! Preference store port — the user's persisted host choice.

use std::future::Future;

use ventlink_domain::error::PreferenceError;

/// Key-value store holding the user's configured unit address.
///
/// Values are validated before they reach the store: either blank or a
/// well-formed IP address.
pub trait PreferenceStore: Send + Sync {
    /// Stored address, or an empty string when none was set.
    fn ip_address(&self) -> impl Future<Output = String> + Send;

    /// Persist a new address.
    fn set_ip_address(
        &self,
        ip_address: String,
    ) -> impl Future<Output = Result<(), PreferenceError>> + Send;
}
