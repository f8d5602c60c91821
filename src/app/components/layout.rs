//! Admin shell wrapping every protected page: sidebar, header, toasts.

use dioxus::prelude::*;

use super::nav::Nav;
use super::toasts::ToastHost;
use crate::app::session_context::use_session;
use crate::app::Route;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in the header and browser tab)
    pub title: String,
    #[props(default)]
    pub subtitle: Option<String>,
    /// Active navigation item ID
    pub nav_active: String,
    /// Buttons rendered at the right of the header
    #[props(default)]
    pub actions: Option<Element>,
    /// Page content
    pub children: Element,
}

/// Main layout component wrapping all protected pages.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let session = use_session();
    let nav = navigator();
    let version = env!("PBA_VERSION");
    let full_title = format!("{} - Photobooth Admin", props.title);
    let user = session.display_name();

    rsx! {
        document::Title { "{full_title}" }
        document::Link { rel: "stylesheet", href: asset!("/public/admin.css") }

        div { class: "admin-shell",
            Nav { active: props.nav_active.clone() }
            div { class: "content",
                header { class: "page-header",
                    div {
                        h1 { "{props.title}" }
                        if let Some(subtitle) = props.subtitle.as_ref() {
                            p { class: "subtitle", "{subtitle}" }
                        }
                    }
                    div { class: "user-menu",
                        if let Some(actions) = props.actions.clone() {
                            {actions}
                        }
                        span { class: "text-muted", "{user}" }
                        button {
                            class: "btn",
                            onclick: move |_| {
                                session.logout();
                                nav.replace(Route::Login {});
                            },
                            "Logout"
                        }
                    }
                }
                main { {props.children} }
                footer { class: "text-muted", style: "margin-top:2rem;font-size:.8rem;",
                    "Photobooth Admin v{version}"
                }
            }
        }
        ToastHost {}
    }
}
