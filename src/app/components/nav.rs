//! Sidebar navigation.

use dioxus::prelude::*;

use crate::app::Route;

/// (id, label, route) in display order
fn nav_items() -> [(&'static str, &'static str, Route); 6] {
    [
        ("dashboard", "Dashboard", Route::Dashboard {}),
        ("leads", "Leads", Route::Leads {}),
        ("gallery", "Gallery", Route::Gallery {}),
        ("blogs", "Blogs", Route::Blogs {}),
        ("analytics", "Analytics", Route::Analytics {}),
        ("settings", "Settings", Route::Settings {}),
    ]
}

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// The currently active page ID (e.g., "dashboard", "leads")
    pub active: String,
}

#[component]
pub fn Nav(props: NavProps) -> Element {
    rsx! {
        nav { class: "sidebar",
            span { class: "brand", "Photobooth Admin" }
            for (id, label, route) in nav_items() {
                Link {
                    key: "{id}",
                    to: route,
                    class: if props.active == id { "active" } else { "" },
                    "{label}"
                }
            }
        }
    }
}
