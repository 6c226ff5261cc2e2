use crate::kernel::services::ports::{Notification, NotificationLevel, Notifier};

/// Notifier for headless shells: every notification becomes a log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => tracing::info!(message = %notification.message, "notify"),
            NotificationLevel::Warning => {
                tracing::warn!(message = %notification.message, "notify")
            }
            NotificationLevel::Error => {
                tracing::error!(message = %notification.message, "notify")
            }
        }
    }
}
