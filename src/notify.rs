//! Notification collaborator: the toast surface the stores talk to.
//!
//! The stores are the sole producers of favorites-related notifications;
//! the host application decides how they are rendered by supplying a
//! [`Notifier`] implementation.

use log::{info, warn};
use tokio::sync::mpsc;

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// A single user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

/// Sink for user-facing notifications emitted by the stores
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Notifier that routes everything to the `log` facade.
///
/// The default when the host application has no toast surface wired up.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => warn!("notification: {}", message),
            _ => info!("notification: {}", message),
        }
    }
}

/// Notifier backed by an unbounded channel.
///
/// The receiving half is handed to the UI layer (or a test) to drain and
/// render. A dropped receiver turns further notifications into no-ops.
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        let _ = self.sender.send(Notification {
            severity,
            message: message.to_string(),
        });
    }
}
