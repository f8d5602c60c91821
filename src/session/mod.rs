//! Session store - the client-held proof of authentication.
//!
//! The token alone decides whether the admin is authenticated; the identity
//! only feeds the display name. Memory and durable storage are updated in
//! the same call, so there is no window where they disagree.
//!
//! One writer (login/logout), many readers (route guard, API client).
//! The store is created once at startup and handed out by clone.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

pub mod storage;

pub use storage::{default_storage, FileStorage, MemoryStorage, SessionStorage};

/// Storage key for the JSON-encoded identity
pub const USER_KEY: &str = "app_user";
/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "app_token";

/// The logged-in admin as returned by `/auth/login`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    #[serde(default)]
    pub id: Option<crate::models::EntityId>,
    #[serde(default)]
    pub username: String,
}

impl Identity {
    pub fn display_name(&self) -> &str {
        if self.username.trim().is_empty() {
            "Admin"
        } else {
            &self.username
        }
    }
}

/// In-memory session state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub identity: Option<Identity>,
    pub token: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<Session>>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Empty, unauthenticated store over `storage` (nothing is read)
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Session::default())),
            storage,
        }
    }

    /// Create a store and immediately restore from `storage`
    pub fn restore_from(storage: Arc<dyn SessionStorage>) -> Self {
        let store = Self::new(storage);
        store.restore();
        store
    }

    /// Store identity and token in memory and durable storage.
    ///
    /// Returns `false` and leaves the session cleared when the token is
    /// empty or contains whitespace.
    pub fn login(&self, identity: Identity, token: &str) -> bool {
        let token = token.trim();
        if !is_well_formed_token(token) {
            tracing::warn!("Refusing to store malformed session token");
            self.logout();
            return false;
        }

        match serde_json::to_string(&identity) {
            Ok(json) => self.storage.set(USER_KEY, &json),
            Err(e) => tracing::error!("Failed to serialize identity: {}", e),
        }
        self.storage.set(TOKEN_KEY, token);

        self.write(|session| {
            session.identity = Some(identity);
            session.token = Some(token.to_string());
        });
        tracing::info!("Session started for {}", self.display_name());
        true
    }

    /// Clear memory and durable storage
    pub fn logout(&self) {
        self.storage.remove(USER_KEY);
        self.storage.remove(TOKEN_KEY);
        let was_authenticated = self.is_authenticated();
        self.write(|session| *session = Session::default());
        if was_authenticated {
            tracing::info!("Session ended");
        }
    }

    /// Populate memory from durable storage.
    ///
    /// Both keys must be present and well formed; otherwise the session is
    /// left unauthenticated and any leftover keys are purged. Never partial.
    pub fn restore(&self) {
        let user = self.storage.get(USER_KEY);
        let token = self.storage.get(TOKEN_KEY);

        let restored = match (user, token) {
            (Some(user), Some(token)) if is_well_formed_token(&token) => {
                match serde_json::from_str::<Identity>(&user) {
                    Ok(identity) => Some(Session {
                        identity: Some(identity),
                        token: Some(token),
                    }),
                    Err(e) => {
                        tracing::warn!("Discarding stored session, identity unreadable: {}", e);
                        None
                    }
                }
            }
            (None, None) => {
                tracing::debug!("No stored session");
                None
            }
            _ => {
                tracing::warn!("Discarding incomplete or malformed stored session");
                None
            }
        };

        match restored {
            Some(session) => {
                self.write(|s| *s = session);
                tracing::info!("Session restored for {}", self.display_name());
            }
            None => {
                self.storage.remove(USER_KEY);
                self.storage.remove(TOKEN_KEY);
                self.write(|s| *s = Session::default());
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(|s| s.is_authenticated())
    }

    pub fn token(&self) -> Option<String> {
        self.read(|s| s.token.clone())
    }

    pub fn identity(&self) -> Option<Identity> {
        self.read(|s| s.identity.clone())
    }

    /// Header display name; "Admin" when the identity is absent
    pub fn display_name(&self) -> String {
        self.read(|s| {
            s.identity
                .as_ref()
                .map(|i| i.display_name().to_string())
                .unwrap_or_else(|| "Admin".to_string())
        })
    }

    pub fn snapshot(&self) -> Session {
        self.read(|s| s.clone())
    }

    fn read<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        match self.state.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write(&self, f: impl FnOnce(&mut Session)) {
        match self.state.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

/// Bearer tokens are opaque, but never empty and never contain whitespace
fn is_well_formed_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}
