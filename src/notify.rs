//! User-visible alerts.
//!
//! Panes never talk to the desktop directly; they hold a [`SharedNotifier`]
//! and call [`Notifier::notify`] when a countdown finishes or the break
//! scheduler switches modes.

use std::sync::Arc;

/// Title used for every alert the panes raise.
pub const APP_TITLE: &str = "Teatime";

/// Receives notification requests from the panes.
///
/// Delivery must not block for long and must not fail the caller; problems are
/// logged by the implementation.
pub trait Notifier: Send + Sync {
    /// Requests an alert with the given title and message.
    fn notify(&self, title: &str, message: &str);
}

/// Notifier handle shared between panes.
pub type SharedNotifier = Arc<dyn Notifier>;

/// Sends desktop notifications through the platform notification service.
#[cfg(feature = "desktop-notifications")]
#[derive(Debug, Default, Clone)]
pub struct DesktopNotifier;

#[cfg(feature = "desktop-notifications")]
impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str) {
        tracing::info!(title, message, "notification");
        let result = notify_rust::Notification::new()
            .summary(title)
            .body(message)
            .appname("teatime")
            .show();
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to deliver desktop notification");
        }
    }
}

/// Writes notifications to the log only.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, message: &str) {
        tracing::info!(title, message, "notification");
    }
}

/// Drops every notification.
#[derive(Debug, Default, Clone)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _title: &str, _message: &str) {}
}

/// Picks the notifier for the given preference.
///
/// Falls back to [`LogNotifier`] when desktop notifications are disabled or
/// the crate was built without them.
pub fn notifier(desktop: bool) -> SharedNotifier {
    if desktop {
        desktop_notifier()
    } else {
        Arc::new(LogNotifier)
    }
}

#[cfg(feature = "desktop-notifications")]
fn desktop_notifier() -> SharedNotifier {
    Arc::new(DesktopNotifier)
}

#[cfg(not(feature = "desktop-notifications"))]
fn desktop_notifier() -> SharedNotifier {
    Arc::new(LogNotifier)
}
