//! Console implementation of [`NotificationSink`].

use ventlink_app::ports::NotificationSink;

/// Prints user-facing messages on stderr, keeping stdout for JSON output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, message: String) {
        eprintln!("{message}");
    }
}
