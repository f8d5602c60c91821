//! Login page. Signed-in users are sent to the dashboard.

use dioxus::prelude::*;

use crate::api::auth::AuthClient;
use crate::app::components::ErrorAlert;
use crate::app::services::use_services;
use crate::app::session_context::use_session;
use crate::app::{use_route_guard, Route};
use crate::guard::RouteAccess;

#[component]
pub fn Login() -> Element {
    let services = use_services();
    let session = use_session();
    let nav = navigator();
    let may_render = use_route_guard(RouteAccess::LoginOnly);

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        submitting.set(true);
        error.set(None);
        let auth = AuthClient::new(services.api.clone());
        spawn(async move {
            match auth.login(&username(), &password()).await {
                Ok(_) => {
                    session.sync();
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            submitting.set(false);
        });
    };

    if !may_render {
        return rsx! {};
    }

    rsx! {
        document::Title { "Login - Photobooth Admin" }
        document::Link { rel: "stylesheet", href: asset!("/public/admin.css") }

        div { class: "login-page",
            div { class: "card login-card",
                h1 { "Admin Login" }
                p { class: "text-muted", "Sign in to manage your photobooth business" }

                if let Some(message) = error() {
                    ErrorAlert { message, on_dismiss: move |_| error.set(None) }
                }

                form { onsubmit: on_submit,
                    div { class: "field",
                        label { r#for: "username", "Username" }
                        input {
                            id: "username",
                            class: "input",
                            autocomplete: "username",
                            value: "{username}",
                            oninput: move |e| username.set(e.value()),
                        }
                    }
                    div { class: "field",
                        label { r#for: "password", "Password" }
                        input {
                            id: "password",
                            class: "input",
                            r#type: "password",
                            autocomplete: "current-password",
                            value: "{password}",
                            oninput: move |e| password.set(e.value()),
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        style: "width:100%;",
                        disabled: submitting(),
                        if submitting() { "Signing in..." } else { "Sign In" }
                    }
                }
            }
        }
    }
}
