use dioxus::prelude::*;

use crate::app::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "login-page",
            div { class: "card",
                h1 { "Page not found" }
                p { class: "text-muted", "Nothing lives at /{path}." }
                Link { to: Route::Dashboard {}, "Back to dashboard" }
            }
        }
    }
}
