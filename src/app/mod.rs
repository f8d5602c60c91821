//! Dioxus application entry point.
//!
//! Provides the root App component, the route table, and the guarded
//! layout every protected page renders inside.

use dioxus::prelude::*;

pub mod components;
pub mod list_handle;
pub mod pages;
pub mod services;
pub mod session_context;
pub mod toast_context;

use crate::config::AdminConfig;
use crate::guard::{decide, GuardDecision, RedirectTarget, RouteAccess};
use pages::{Analytics, Blogs, Dashboard, Gallery, Leads, Login, NotFound, Settings};
use services::AppServices;
use session_context::{use_session, use_session_provider};
use toast_context::use_toast_provider;

/// Root app component
#[component]
pub fn App() -> Element {
    let config = try_consume_context::<AdminConfig>().unwrap_or_default();
    let services = use_hook(move || AppServices::new(config).map_err(|e| e.to_string()));

    match services {
        Ok(services) => rsx! { Shell { services } },
        Err(message) => rsx! {
            div { class: "login-page",
                div { class: "card",
                    h2 { "Configuration error" }
                    p { "The API base URL is invalid: {message}" }
                }
            }
        },
    }
}

/// Providers plus router, mounted once services exist
#[component]
fn Shell(services: AppServices) -> Element {
    use_session_provider(services.session.clone());
    use_toast_provider(services.notifications.clone());
    use_context_provider(|| services.clone());

    rsx! {
        Router::<Route> {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login")]
    Login {},
    #[layout(Protected)]
        #[route("/")]
        Dashboard {},
        #[route("/leads")]
        Leads {},
        #[route("/gallery")]
        Gallery {},
        #[route("/blogs")]
        Blogs {},
        #[route("/analytics")]
        Analytics {},
        #[route("/settings")]
        Settings {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

pub fn route_for(target: RedirectTarget) -> Route {
    match target {
        RedirectTarget::Login => Route::Login {},
        RedirectTarget::Home => Route::Dashboard {},
    }
}

/// Run the route guard for `access`, redirecting when it says so.
///
/// Returns true when the page may render. Nothing renders and nothing
/// redirects until the stored session has been applied.
pub fn use_route_guard(access: RouteAccess) -> bool {
    let session = use_session();
    let nav = navigator();

    use_effect(move || {
        if !session.is_ready() {
            return;
        }
        if let GuardDecision::Redirect(target) = decide(access, session.is_authenticated()) {
            nav.replace(route_for(target));
        }
    });

    session.is_ready() && decide(access, session.is_authenticated()) == GuardDecision::Render
}

/// Layout route for every page that needs a session
#[component]
fn Protected() -> Element {
    if use_route_guard(RouteAccess::Protected) {
        rsx! { Outlet::<Route> {} }
    } else {
        rsx! {}
    }
}
