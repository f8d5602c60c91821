//! Blocking yes/no prompt shown before destructive actions.

use dioxus::prelude::*;

use super::modal::Modal;

#[component]
pub fn ConfirmDialog(
    message: String,
    #[props(default = "Delete")] confirm_label: &'static str,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        Modal { title: "Are you sure?".to_string(), on_close: move |_| on_cancel.call(()),
            p { "{message}" }
            div { class: "modal-actions",
                button { class: "btn", onclick: move |_| on_cancel.call(()), "Cancel" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_confirm.call(()),
                    "{confirm_label}"
                }
            }
        }
    }
}
