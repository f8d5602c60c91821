//! Long-lived handles shared by every page.

use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::config::AdminConfig;
use crate::notify::Notifications;
use crate::session::{storage::default_storage, SessionStore};

/// Built once at the app root and provided as context
#[derive(Clone)]
pub struct AppServices {
    pub config: AdminConfig,
    pub session: SessionStore,
    pub api: ApiClient,
    pub notifications: Notifications,
}

impl AppServices {
    /// Restore the session from durable storage and build the API client
    pub fn new(config: AdminConfig) -> Result<Self, url::ParseError> {
        let session = SessionStore::restore_from(default_storage());
        let api = ApiClient::new(&config, session.clone())?;
        tracing::info!(
            api = %api.base_url(),
            authenticated = session.is_authenticated(),
            "Admin services ready"
        );
        Ok(Self {
            config,
            session,
            api,
            notifications: Notifications::new(),
        })
    }
}

// Services are created once per app; the config identifies them
impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

pub fn use_services() -> AppServices {
    use_context::<AppServices>()
}
