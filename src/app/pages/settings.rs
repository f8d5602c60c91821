//! Settings page: read-only view of the connection and upload settings.

use dioxus::prelude::*;

use crate::app::components::Layout;
use crate::app::services::use_services;
use crate::app::session_context::use_session;

#[component]
pub fn Settings() -> Element {
    let services = use_services();
    let session = use_session();
    let config = services.config.clone();
    let upload = config.upload.clone();
    let budget_kb = upload.max_bytes / 1024;
    let user = session.display_name();
    let api_url = services.api.base_url().to_string();
    let auto_logout = if config.logout_on_unauthorized {
        "Sign out when the server rejects the session"
    } else {
        "Keep the session; show an error instead"
    };

    rsx! {
        Layout {
            title: "Settings".to_string(),
            subtitle: Some("Connection and upload preferences".to_string()),
            nav_active: "settings".to_string(),

            section { class: "card",
                h2 { "Account" }
                p { "Signed in as " strong { "{user}" } }
            }

            section { class: "card",
                h2 { "Server" }
                table {
                    tbody {
                        tr { th { "API base URL" } td { code { "{api_url}" } } }
                        tr { th { "Request timeout" } td { "{config.request_timeout_secs} s" } }
                        tr { th { "Rows per page" } td { "{config.page_size}" } }
                        tr { th { "Expired session" } td { "{auto_logout}" } }
                    }
                }
            }

            section { class: "card",
                h2 { "Catalogue" }
                p { class: "text-muted",
                    "Services, packages, event types and careers have no server endpoints yet, "
                    "so they are not managed here. Edit them on the public site."
                }
            }

            section { class: "card",
                h2 { "Image uploads" }
                p { class: "text-muted",
                    "Images are resized and re-encoded as JPEG in the browser before upload."
                }
                table {
                    tbody {
                        tr { th { "Longest side" } td { "{upload.max_dimension} px" } }
                        tr { th { "Size budget" } td { "{budget_kb} KB" } }
                        tr { th { "JPEG quality" } td { "{upload.initial_quality} down to {upload.min_quality}" } }
                    }
                }
            }
        }
    }
}
