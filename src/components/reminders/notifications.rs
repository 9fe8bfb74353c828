use notify_rust::Notification;
use tracing::{info, warn};

use super::matcher::DueAlarm;
use crate::error::{CalResult, Error};

/// Delivery capability for due alarms. Tests substitute a recording mock;
/// the daemon uses [`DesktopNotifier`].
pub trait Notifier: Send + Sync {
    /// Display a transient notification
    fn notify(&self, title: &str, body: &str) -> CalResult<()>;
}

/// Notifier backed by the platform desktop notification service
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> CalResult<()> {
        Notification::new()
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| Error::Notification(e.to_string()))
    }
}

/// Deliver every due alarm. Delivery failures are logged and swallowed so
/// a broken notification service never stops the reminder loop.
pub fn check_due(notifier: &dyn Notifier, title: &str, due: &[DueAlarm]) {
    for alarm in due {
        info!("Alarm due for {}", alarm.event_title);

        if let Err(e) = notifier.notify(title, &alarm.body) {
            warn!(
                "Failed to deliver notification for {}: {}",
                alarm.event_title, e
            );
        }
    }
}
