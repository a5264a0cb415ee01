// src/toast.rs
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

use crate::app_log;

pub const TOAST_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
    pub generation: u64,
}

impl Toast {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < TOAST_DURATION
    }
}

#[derive(Debug, Default)]
struct ToastSlot {
    current: Option<Toast>,
    generation: u64,
}

/// Single shared message slot. A new toast replaces the current one
/// immediately; nothing is queued.
#[derive(Debug, Clone, Default)]
pub struct ToastNotifier {
    slot: Arc<Mutex<ToastSlot>>,
}

impl ToastNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ToastSlot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Show a message and, when a tokio runtime is available, schedule its
    /// dismissal 4 s later.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let message = message.into();
        let generation = {
            let mut slot = self.lock();
            slot.generation += 1;
            slot.current = Some(Toast {
                message: message.clone(),
                severity,
                shown_at: Instant::now(),
                generation: slot.generation,
            });
            slot.generation
        };

        match severity {
            Severity::Success => app_log!(info, "Toast: {}", message),
            Severity::Error => app_log!(warn, "Toast: {}", message),
        }

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let notifier = self.clone();
            handle.spawn(async move {
                tokio::time::sleep(TOAST_DURATION).await;
                notifier.dismiss(generation);
            });
        }

        generation
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Error)
    }

    /// Hide the toast only if it is still the one identified by `generation`.
    pub fn dismiss(&self, generation: u64) -> bool {
        let mut slot = self.lock();
        match &slot.current {
            Some(toast) if toast.generation == generation => {
                slot.current = None;
                true
            }
            _ => false,
        }
    }

    /// The toast on screen right now, if any.
    pub fn current(&self) -> Option<Toast> {
        let now = Instant::now();
        self.lock()
            .current
            .as_ref()
            .filter(|toast| toast.is_visible_at(now))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_new_toast_replaces_current() {
        let notifier = ToastNotifier::new();
        notifier.error("first");
        notifier.success("second");

        let toast = notifier.current().unwrap();
        assert_eq!(toast.message, "second");
        assert_eq!(toast.severity, Severity::Success);
        assert_eq!(toast.generation, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_dismissed_after_four_seconds() {
        let notifier = ToastNotifier::new();
        notifier.success("saved");

        tokio::time::sleep(Duration::from_millis(3999)).await;
        assert!(notifier.current().is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(notifier.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replacement_restarts_timer() {
        let notifier = ToastNotifier::new();
        notifier.success("one");

        tokio::time::sleep(Duration::from_millis(3000)).await;
        notifier.error("two");

        // The first toast's timer fires here but must not hide the second.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(notifier.current().unwrap().message, "two");

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_stale_dismiss_ignored() {
        let notifier = ToastNotifier::new();
        let first = notifier.success("one");
        notifier.success("two");

        assert!(!notifier.dismiss(first));
        assert_eq!(notifier.current().unwrap().message, "two");
    }
}
