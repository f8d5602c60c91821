//! Reactive view of the session store.
//!
//! The store itself is not reactive, so every place that can change it
//! (login, logout, a 401 under the auto-logout policy) calls `sync` to push
//! the new state into these signals.
//!
//! The context is not `ready` until the app has mounted in the browser. The
//! server render and the first client render both see it unready, so they
//! produce the same markup; the stored session is applied right after.

use dioxus::prelude::*;

use crate::session::SessionStore;

#[derive(Clone, Copy)]
pub struct SessionContext {
    store: CopyValue<SessionStore>,
    authenticated: Signal<bool>,
    display_name: Signal<String>,
    ready: Signal<bool>,
}

impl SessionContext {
    /// False during server rendering and hydration
    pub fn is_ready(&self) -> bool {
        (self.ready)()
    }

    pub fn is_authenticated(&self) -> bool {
        (self.authenticated)()
    }

    pub fn display_name(&self) -> String {
        (self.display_name)()
    }

    pub fn store(&self) -> SessionStore {
        self.store.read().clone()
    }

    /// Copy the store's current state into the signals
    pub fn sync(&self) {
        let store = self.store();
        let mut authenticated = self.authenticated;
        let mut display_name = self.display_name;
        let now = store.is_authenticated();
        if *authenticated.peek() != now {
            authenticated.set(now);
        }
        let name = store.display_name();
        if *display_name.peek() != name {
            display_name.set(name);
        }
    }

    pub fn logout(&self) {
        self.store().logout();
        self.sync();
    }
}

/// Initialize session context provider - call once at app root
pub fn use_session_provider(store: SessionStore) -> SessionContext {
    let authenticated = use_signal(|| false);
    let display_name = use_signal(String::new);
    let mut ready = use_signal(|| false);
    let store = use_hook(|| CopyValue::new(store));

    let context = use_context_provider(|| SessionContext {
        store,
        authenticated,
        display_name,
        ready,
    });

    // Effects only run once mounted, never during server rendering
    use_effect(move || {
        context.sync();
        ready.set(true);
    });

    context
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}
