/// Boundary for transient user-facing notifications (toast-style).
///
/// The presentation layer supplies an implementation; the core never
/// assumes a particular mechanism, so any toast/snackbar/status-line
/// widget can be plugged in.
pub trait NotificationSink: Send + Sync {
    /// A user action completed (e.g., "Transaction added").
    fn success(&self, message: &str);

    /// A user action failed and is worth retrying.
    fn error(&self, message: &str);
}

/// Sink that discards every notification. The default for headless use.
#[derive(Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn success(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
