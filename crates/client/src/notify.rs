//! Transient user notifications.
//!
//! Notifications are fire-and-forget: the controller emits them and never
//! waits for them to be shown or dismissed. Several may be visible at once.

use std::cell::RefCell;
use std::rc::Rc;

use hotel_favorites_core::Severity;

/// Notification texts shown to the visitor.
pub mod messages {
    pub const OWNER_DENIED: &str =
        "This feature is only available to guests. Switch to a customer account to use it.";
    pub const REMOTE_SAVED: &str = "Saved to favorites!";
    pub const REMOTE_REMOVED: &str = "Removed from favorites";
    pub const REMOTE_FAILED: &str = "Something went wrong. Please try again shortly.";
    pub const LOCAL_SAVED: &str =
        "Added to your favorites! Sign in to keep them saved across devices.";
    pub const LOCAL_REMOVED: &str = "Removed from your favorites.";
    pub const LOCAL_SAVE_FAILED: &str = "Your favorites couldn't be saved on this device.";
    pub const SYNC_ADDED: &str = "Your saved favorites have been synced to your account.";
    pub const SYNC_FAILED: &str =
        "We couldn't sync your favorites right now. Please try again later.";
}

/// A message for the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: &'static str,
}

impl Notification {
    #[must_use]
    pub const fn new(severity: Severity, message: &'static str) -> Self {
        Self { severity, message }
    }

    #[must_use]
    pub const fn info(message: &'static str) -> Self {
        Self::new(Severity::Info, message)
    }

    #[must_use]
    pub const fn success(message: &'static str) -> Self {
        Self::new(Severity::Success, message)
    }

    #[must_use]
    pub const fn warning(message: &'static str) -> Self {
        Self::new(Severity::Warning, message)
    }

    #[must_use]
    pub const fn danger(message: &'static str) -> Self {
        Self::new(Severity::Danger, message)
    }
}

/// Surface that displays notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier + ?Sized> Notifier for Rc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let severity = notification.severity.as_str();
        match notification.severity {
            Severity::Danger => tracing::error!(severity, "{}", notification.message),
            Severity::Warning => tracing::warn!(severity, "{}", notification.message),
            Severity::Info | Severity::Success => {
                tracing::info!(severity, "{}", notification.message);
            }
        }
    }
}

/// Keeps every notification in order of emission.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of all notifications emitted so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    /// Remove and return all notifications emitted so far.
    pub fn take(&self) -> Vec<Notification> {
        self.notifications.take()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }
}
