use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
}

/// Contents of the snackbar slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub visible: bool,
    pub message: String,
    pub kind: NotificationKind,
}

/// Single-slot snackbar state. A new `show` replaces whatever is showing;
/// there is no queue.
pub struct NotificationStore {
    slot: watch::Sender<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(Notification::default());
        Self { slot }
    }

    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        let notification = Notification {
            visible: true,
            message: message.into(),
            kind,
        };
        tracing::debug!(kind = ?notification.kind, message = %notification.message, "snackbar shown");
        self.slot.send_replace(notification);
    }

    /// `show` with the default kind.
    pub fn info(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::default());
    }

    /// Hides the snackbar, keeping message and kind for the exit animation.
    pub fn hide(&self) {
        self.slot.send_modify(|n| n.visible = false);
    }

    pub fn snapshot(&self) -> Notification {
        self.slot.borrow().clone()
    }

    /// Receiver for the presentational layer; it sees every replacement.
    pub fn subscribe(&self) -> watch::Receiver<Notification> {
        self.slot.subscribe()
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref SNACKBAR: NotificationStore = NotificationStore::new();
}

/// Process-wide store, created on first access and never torn down.
pub fn global() -> &'static NotificationStore {
    &SNACKBAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden_with_info_kind() {
        let store = NotificationStore::new();
        let n = store.snapshot();
        assert!(!n.visible);
        assert_eq!(n.kind, NotificationKind::Info);
    }

    #[test]
    fn test_last_show_wins() {
        let store = NotificationStore::new();
        store.show("X", NotificationKind::Error);
        store.show("Y", NotificationKind::Success);

        assert_eq!(
            store.snapshot(),
            Notification {
                visible: true,
                message: "Y".into(),
                kind: NotificationKind::Success,
            }
        );
    }

    #[test]
    fn test_hide_keeps_message() {
        let store = NotificationStore::new();
        store.show("X", NotificationKind::Success);
        store.hide();

        let n = store.snapshot();
        assert!(!n.visible);
        assert_eq!(n.message, "X");
        assert_eq!(n.kind, NotificationKind::Success);
    }

    #[test]
    fn test_info_uses_default_kind() {
        let store = NotificationStore::new();
        store.info("Saved draft");
        assert_eq!(store.snapshot().kind, NotificationKind::Info);
    }

    #[tokio::test]
    async fn test_subscriber_sees_latest_value() {
        let store = NotificationStore::new();
        let mut rx = store.subscribe();

        store.show("first", NotificationKind::Info);
        store.show("second", NotificationKind::Error);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().message, "second");
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(global(), global()));
    }
}
