//! Transient toast notifications.
//!
//! Controllers push; the presentation layer drains and renders. The queue is
//! shared by clone so every view reports into the same toaster.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Oldest toasts are dropped beyond this
const MAX_QUEUED: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Default)]
struct ToastQueue {
    next_id: u64,
    pending: VecDeque<Toast>,
}

#[derive(Clone, Default)]
pub struct Notifications {
    inner: Arc<Mutex<ToastQueue>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let Ok(mut queue) = self.inner.lock() else {
            return;
        };
        queue.next_id += 1;
        let id = queue.next_id;
        queue.pending.push_back(Toast { id, kind, message });
        while queue.pending.len() > MAX_QUEUED {
            queue.pending.pop_front();
        }
    }

    /// Take every pending toast, oldest first
    pub fn drain(&self) -> Vec<Toast> {
        match self.inner.lock() {
            Ok(mut queue) => queue.pending.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Copy of the pending toasts without consuming them
    pub fn pending(&self) -> Vec<Toast> {
        match self.inner.lock() {
            Ok(queue) => queue.pending.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}
