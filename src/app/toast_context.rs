//! Toasts visible on screen, fed from the shared notification queue.

use dioxus::prelude::*;

use crate::notify::{Notifications, Toast};

/// Older toasts scroll off beyond this
const MAX_VISIBLE: usize = 4;

#[derive(Clone, Copy)]
pub struct ToastContext {
    source: CopyValue<Notifications>,
    visible: Signal<Vec<Toast>>,
}

impl ToastContext {
    pub fn visible(&self) -> Vec<Toast> {
        (self.visible)()
    }

    /// Move queued notifications on screen
    pub fn flush(&self) {
        let drained = self.source.read().drain();
        if drained.is_empty() {
            return;
        }
        let mut visible = self.visible;
        let mut list = visible.write();
        list.extend(drained);
        let excess = list.len().saturating_sub(MAX_VISIBLE);
        let kept = list.split_off(excess);
        *list = kept;
    }

    pub fn dismiss(&self, id: u64) {
        let mut visible = self.visible;
        visible.write().retain(|t| t.id != id);
    }
}

pub fn use_toast_provider(source: Notifications) -> ToastContext {
    let visible = use_signal(Vec::new);
    let source = use_hook(|| CopyValue::new(source));
    use_context_provider(|| ToastContext { source, visible })
}

pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>()
}
