//! Toast notification collaborator.

use log::{info, warn};
use std::cell::RefCell;
use std::fmt::{Display, Formatter};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Fire-and-forget user notification sink.
pub trait Notifier {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => info!("event=notify module=ui kind={kind} message={message}"),
            NotificationKind::Warning => warn!("event=notify module=ui kind={kind} message={message}"),
        }
    }
}

/// Keeps every notification in memory; useful for hosts that drain toasts.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: RefCell<Vec<(NotificationKind, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears recorded notifications.
    pub fn take(&self) -> Vec<(NotificationKind, String)> {
        self.entries.take()
    }

    pub fn last(&self) -> Option<(NotificationKind, String)> {
        self.entries.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.entries.borrow_mut().push((kind, message.to_string()));
    }
}

impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
    fn notify(&self, kind: NotificationKind, message: &str) {
        (**self).notify(kind, message);
    }
}
