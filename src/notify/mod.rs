use leptos::prelude::*;
use std::time::Duration;

use crate::error::SiteError;

pub(crate) const MAX_VISIBLE: usize = 5;
pub(crate) const AUTO_DISMISS: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

/// Visible toasts, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NoticeQueue {
    next_id: u64,
    items: Vec<Notice>,
}

impl NoticeQueue {
    pub fn push(&mut self, kind: NoticeKind, title: String, description: Option<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notice {
            id,
            kind,
            title,
            description,
        });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }
}

/// Handle for raising toasts from anywhere in the view tree.
#[derive(Clone, Copy)]
pub(crate) struct Notifier {
    queue: RwSignal<NoticeQueue>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(NoticeQueue::default()),
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.queue.with(|q| q.items().to_vec())
    }

    pub fn success(&self, title: impl Into<String>) {
        self.raise(NoticeKind::Success, title.into(), None);
    }

    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) {
        self.raise(NoticeKind::Error, title.into(), Some(description.into()));
    }

    /// Logs a failed backend operation and raises its error toast.
    pub fn failure(&self, title: &str, err: &SiteError) {
        log::error!("{title}: {err}");
        self.error("Error", format!("{title} {err}"));
    }

    pub fn dismiss(&self, id: u64) {
        // The owning scope may already be gone when a timer fires.
        let _ = self.queue.try_update(|q| q.dismiss(id));
    }

    fn raise(&self, kind: NoticeKind, title: String, description: Option<String>) {
        let Some(id) = self.queue.try_update(|q| q.push(kind, title, description)) else {
            return;
        };
        self.schedule_dismiss(id);
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: u64) {
        let notifier = *self;
        set_timeout(move || notifier.dismiss(id), AUTO_DISMISS);
    }

    // No browser timers off-wasm; toasts stay until dismissed.
    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: u64) {}
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
