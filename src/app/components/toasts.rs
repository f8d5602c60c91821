//! Toast stack in the corner of the screen. Click to dismiss.

use dioxus::prelude::*;

use crate::app::toast_context::use_toasts;
use crate::notify::ToastKind;

#[component]
pub fn ToastHost() -> Element {
    let toasts = use_toasts();

    rsx! {
        div { class: "toasts", "aria-live": "polite",
            for toast in toasts.visible() {
                div {
                    key: "{toast.id}",
                    class: match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                        ToastKind::Info => "toast toast-info",
                    },
                    onclick: move |_| toasts.dismiss(toast.id),
                    "{toast.message}"
                }
            }
        }
    }
}
