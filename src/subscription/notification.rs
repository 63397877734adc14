//! Transient confirmation notifications.
//!
//! At most one notification is current. Each one gets a fresh `id`, and
//! [`NotificationCenter::clear_if`] only clears the notification it names,
//! so an expiry timer armed for an old notification can never remove a
//! newer one.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationState {
    pub id: u64,
    pub visible: bool,
    pub message: String,
    pub kind: NotificationKind,
    pub expires_after_ms: u64,
}

impl NotificationState {
    pub fn expires_after(&self) -> Duration {
        Duration::from_millis(self.expires_after_ms)
    }
}

#[derive(Debug)]
pub struct NotificationCenter {
    current: watch::Sender<Option<NotificationState>>,
    next_id: AtomicU64,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            current,
            next_id: AtomicU64::new(1),
            timer: Mutex::new(None),
        }
    }

    pub fn current(&self) -> Option<NotificationState> {
        self.current.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<Option<NotificationState>> {
        self.current.subscribe()
    }

    /// Replaces whatever is showing with a new visible notification.
    pub fn publish(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
        lifetime: Duration,
    ) -> NotificationState {
        let notification = NotificationState {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            visible: true,
            message: message.into(),
            kind,
            expires_after_ms: lifetime.as_millis() as u64,
        };
        self.current.send_replace(Some(notification.clone()));
        notification
    }

    /// Clears the notification only if `id` is still the current one.
    pub fn clear_if(&self, id: u64) -> bool {
        self.current.send_if_modified(|current| match current {
            Some(notification) if notification.id == id => {
                *current = None;
                true
            }
            _ => false,
        })
    }

    /// Clears whatever is showing. Returns whether anything was.
    pub fn dismiss(&self) -> bool {
        self.current.send_replace(None).is_some()
    }

    /// Installs the expiry timer for the current notification, aborting the previous one.
    pub fn replace_timer(&self, handle: JoinHandle<()>) {
        let previous = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    pub fn take_timer(&self) -> Option<JoinHandle<()>> {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
