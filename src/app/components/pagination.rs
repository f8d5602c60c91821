//! Pager under a list: range label, previous/next, page numbers.

use dioxus::prelude::*;

#[component]
pub fn PaginationBar(
    /// "Showing X to Y of Z entries"
    label: String,
    page: usize,
    total_pages: usize,
    has_prev: bool,
    has_next: bool,
    on_prev: EventHandler<()>,
    on_next: EventHandler<()>,
    on_page: EventHandler<usize>,
) -> Element {
    rsx! {
        div { class: "pagination",
            span { class: "text-muted", "{label}" }
            div { class: "pages",
                button {
                    class: "btn",
                    disabled: !has_prev,
                    onclick: move |_| on_prev.call(()),
                    "Previous"
                }
                for n in 1..=total_pages {
                    button {
                        key: "{n}",
                        class: if n == page { "btn btn-primary" } else { "btn" },
                        onclick: move |_| on_page.call(n),
                        "{n}"
                    }
                }
                button {
                    class: "btn",
                    disabled: !has_next,
                    onclick: move |_| on_next.call(()),
                    "Next"
                }
            }
        }
    }
}
