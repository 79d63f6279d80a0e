//! Shared record of the currently known unit host.

use std::sync::{Arc, Mutex, PoisonError};

/// Process-wide holder for at most one unit host.
///
/// Cloning yields another handle to the same value. Discovery, preference
/// updates and operation setup may touch it from different tasks, so every
/// access goes through a mutex. A blank host is never stored.
#[derive(Debug, Clone, Default)]
pub struct HostCache {
    host: Arc<Mutex<Option<String>>>,
}

impl HostCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current host, if any.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.host
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current host. A blank value empties the cache.
    pub fn set(&self, host: impl Into<String>) {
        let host = host.into();
        let host = host.trim();
        let mut guard = self.host.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = (!host.is_empty()).then(|| host.to_string());
    }

    pub fn clear(&self) {
        *self.host.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
