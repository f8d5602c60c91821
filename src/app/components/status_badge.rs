use dioxus::prelude::*;

use crate::models::status_class;

#[component]
pub fn StatusBadge(status: String) -> Element {
    let class = format!("status-badge {}", status_class(&status));
    rsx! {
        span { class: "{class}", "{status}" }
    }
}
