//! In-memory toast stack fed by action controls.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use onix_core::{Notification, NotificationSink};

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

/// Toasts kept at once; the oldest is dropped first.
pub const MAX_TOASTS: usize = 5;

/// A notification with the time it was raised.
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub raised_at: Instant,
}

/// Shared, bounded stack of recent notifications.
///
/// Cloning gives another handle to the same stack.
#[derive(Debug, Clone, Default)]
pub struct ToastStore {
    toasts: Arc<Mutex<VecDeque<Toast>>>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification raised at `now`.
    pub fn push_at(&self, notification: Notification, now: Instant) {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.push_back(Toast {
            notification,
            raised_at: now,
        });
        while toasts.len() > MAX_TOASTS {
            toasts.pop_front();
        }
    }

    /// Drop expired toasts and return the remaining ones, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<Toast> {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.retain(|t| now.saturating_duration_since(t.raised_at) < TOAST_TTL);
        toasts.iter().cloned().collect()
    }

    /// Remove every toast.
    pub fn clear(&self) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl NotificationSink for ToastStore {
    fn notify(&self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire() {
        let store = ToastStore::new();
        let start = Instant::now();
        store.push_at(Notification::error("Failed to start the application", "boom"), start);

        assert_eq!(store.visible(start + Duration::from_secs(1)).len(), 1);
        assert!(store.visible(start + TOAST_TTL).is_empty());
    }

    #[test]
    fn test_oldest_toast_dropped_past_cap() {
        let store = ToastStore::new();
        let now = Instant::now();
        for i in 0..MAX_TOASTS + 2 {
            store.push_at(Notification::info(format!("t{i}"), ""), now);
        }

        let visible = store.visible(now);
        assert_eq!(visible.len(), MAX_TOASTS);
        assert_eq!(visible[0].notification.title, "t2");
    }

    #[test]
    fn test_handles_share_the_stack() {
        let store = ToastStore::new();
        let sink: Arc<dyn NotificationSink> = Arc::new(store.clone());
        sink.notify(Notification::error("Operation failed", "x"));

        assert_eq!(store.visible(Instant::now()).len(), 1);
        store.clear();
        assert!(store.visible(Instant::now()).is_empty());
    }
}
