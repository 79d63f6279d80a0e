//! Notification port — free-text messages for the user.

/// Receives user-visible messages produced by the orchestrator.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: String);
}

impl<T: NotificationSink> NotificationSink for std::sync::Arc<T> {
    fn notify(&self, message: String) {
        (**self).notify(message);
    }
}
