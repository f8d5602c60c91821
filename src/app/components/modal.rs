//! Modal dialog shell.

use dioxus::prelude::*;

#[component]
pub fn Modal(
    title: String,
    /// Called when the backdrop or the close button is clicked
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div { class: "modal-backdrop", onclick: move |_| on_close.call(()),
            div {
                class: "modal",
                role: "dialog",
                onclick: move |e| e.stop_propagation(),
                div { class: "page-header",
                    h2 { style: "margin:0;", "{title}" }
                    button { class: "btn", onclick: move |_| on_close.call(()), "×" }
                }
                {children}
            }
        }
    }
}
