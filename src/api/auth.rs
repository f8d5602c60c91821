//! Login: `POST /auth/login {username, password} -> {user, token}`
//!
//! Failures here are `AuthFailed` with the text shown under the form, not
//! toasts. The login call is not a protected call, so a 401 here never
//! triggers the auto-logout policy.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{decode_envelope, ApiClient, ApiError};
use crate::error::AdminError;
use crate::session::Identity;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const NETWORK_ERROR: &str = "Network error. Please check your connection.";
const UNEXPECTED_REPLY: &str = "Unexpected response from server";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub user: Option<Identity>,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token and start the session
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, AdminError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AdminError::AuthFailed(
                "Enter your username and password".to_string(),
            ));
        }

        let reply = self.request_token(username, password).await.map_err(|e| {
            tracing::warn!(kind = e.kind(), "Login failed: {}", e);
            AdminError::AuthFailed(match e {
                ApiError::NetworkUnreachable { .. } => NETWORK_ERROR.to_string(),
                ApiError::ServerRejected { message, .. } if !message.trim().is_empty() => message,
                ApiError::ServerRejected { .. } => INVALID_CREDENTIALS.to_string(),
                ApiError::MalformedResponse { .. } => UNEXPECTED_REPLY.to_string(),
            })
        })?;

        // The identity only feeds the display name; fall back to what was typed
        let identity = reply.user.unwrap_or_else(|| Identity {
            id: None,
            username: username.to_string(),
        });
        if !self.api.session().login(identity.clone(), &reply.token) {
            tracing::warn!("Login reply carried an unusable token");
            return Err(AdminError::AuthFailed(UNEXPECTED_REPLY.to_string()));
        }
        Ok(identity)
    }

    async fn request_token(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest { username, password };
        let url = self.api.endpoint(&["auth", "login"]);

        let response = self
            .api
            .bare_request(Method::POST, url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::transport)?;

        let status = response.status();
        let text = response.text().await.map_err(ApiError::transport)?;
        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| super::body_message(&v))
                .unwrap_or_default();
            return Err(ApiError::ServerRejected {
                status: status.as_u16(),
                message,
            });
        }
        decode_envelope(status.as_u16(), &text)
    }

    pub fn logout(&self) {
        self.api.session().logout();
    }
}
