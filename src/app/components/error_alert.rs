//! Dismissable error alert component.

use dioxus::prelude::*;

/// Inline error with a close button; used by forms, not for toasts.
#[component]
pub fn ErrorAlert(
    /// The error message to display
    message: String,
    /// Called when the dismiss button is clicked
    on_dismiss: Option<EventHandler<()>>,
) -> Element {
    rsx! {
        div { class: "alert-error", role: "alert",
            "{message}"
            if let Some(on_dismiss) = on_dismiss {
                button {
                    class: "btn btn-sm",
                    style: "margin-left:.5rem;",
                    onclick: move |_| on_dismiss.call(()),
                    "×"
                }
            }
        }
    }
}
