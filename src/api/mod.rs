//! Remote resource client for the photobooth REST API.
//!
//! One `ApiClient` is shared by every entity family. It attaches the bearer
//! token, applies the request timeout, and folds every failure into one of
//! three kinds:
//!
//! - `NetworkUnreachable`: DNS, connection refused, timeout
//! - `ServerRejected`: non-2xx, or `{"success": false}` in a 2xx body
//! - `MalformedResponse`: 2xx whose body does not parse as expected
//!
//! Callers treat all three the same way (notify, leave local state alone);
//! the kind only matters for logs. There is no retry.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::AdminConfig;
use crate::session::SessionStore;

pub mod auth;
pub mod gallery;
pub mod leads;
pub mod posts;
pub mod traits;

pub use auth::{AuthClient, LoginResponse};
pub use gallery::GalleryClient;
pub use leads::LeadsClient;
pub use posts::{CategoriesClient, PostsClient};
pub use traits::{BinaryUploader, DraftClient, EntityClient, StatusClient};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("network unreachable: {message}")]
    NetworkUnreachable { message: String },

    #[error("server rejected request ({status}): {message}")]
    ServerRejected { status: u16, message: String },

    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
}

impl ApiError {
    /// Stable label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NetworkUnreachable { .. } => "NetworkUnreachable",
            ApiError::ServerRejected { .. } => "ServerRejected",
            ApiError::MalformedResponse { .. } => "MalformedResponse",
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::NetworkUnreachable { .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::ServerRejected { status: 401, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ServerRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided message, when there is one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::ServerRejected { message, .. } => Some(message),
            _ => None,
        }
    }

    fn transport(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        ApiError::NetworkUnreachable { message }
    }

    fn malformed(err: impl std::fmt::Display) -> Self {
        ApiError::MalformedResponse {
            message: err.to_string(),
        }
    }
}

/// A file ready for multipart transfer
#[derive(Clone, Debug, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Server-assigned location of an uploaded file
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UploadedAsset {
    #[serde(alias = "imageUrl", alias = "image_url", alias = "location")]
    pub url: String,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
    timeout: Duration,
    logout_on_unauthorized: bool,
}

impl ApiClient {
    pub fn new(config: &AdminConfig, session: SessionStore) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(&config.api_base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        // Segments are appended, so the base path must not end in an empty segment
        if base_url.path().ends_with('/') && base_url.path() != "/" {
            let trimmed = base_url.path().trim_end_matches('/').to_string();
            base_url.set_path(&trimmed);
        }

        #[allow(clippy::expect_used)] // HTTP client creation only fails if TLS setup fails
        let http = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            http,
            base_url,
            session,
            timeout: config.request_timeout(),
            logout_on_unauthorized: config.logout_on_unauthorized,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments (each segment is percent-encoded)
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Unauthenticated request carrying the configured timeout. The timeout
    /// is per request; browser builds have no client-wide one.
    pub(crate) fn bare_request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        self.http.request(method, url).timeout(self.timeout)
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let request = self.bare_request(method, self.endpoint(segments));
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send and return `(status, body)` for any 2xx; reject everything else
    async fn execute(&self, request: RequestBuilder) -> Result<(u16, String), ApiError> {
        let response = request.send().await.map_err(ApiError::transport)?;
        self.read_body(response).await
    }

    async fn read_body(&self, response: Response) -> Result<(u16, String), ApiError> {
        let status = response.status();
        let body = response.text().await.map_err(ApiError::transport)?;

        if status.is_success() {
            return Ok((status.as_u16(), body));
        }

        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| body_message(&v))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        let err = ApiError::ServerRejected {
            status: status.as_u16(),
            message,
        };
        self.on_rejected(&err);
        Err(err)
    }

    /// Auto-logout on 401 when configured; otherwise the session is left alone
    fn on_rejected(&self, err: &ApiError) {
        if err.is_unauthorized() && self.logout_on_unauthorized && self.session.is_authenticated() {
            tracing::warn!("API rejected the session token, logging out");
            self.session.logout();
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let (status, body) = self.execute(self.request(Method::GET, segments)).await?;
        decode_envelope(status, &body)
    }

    /// Send a JSON body and decode the (optional) record in the reply
    pub async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        let request = self.request(method, segments).json(body);
        let (status, body) = self.execute(request).await?;
        decode_optional(status, &body)
    }

    /// Send a request whose reply carries no record, only `{"success": ..}`
    pub async fn send_ack<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let mut request = self.request(method, segments);
        if let Some(body) = body {
            request = request.json(body);
        }
        let (status, body) = self.execute(request).await?;
        decode_ack(status, &body)
    }

    /// Multipart upload: the file under `file_field` plus plain text fields
    pub async fn upload_multipart(
        &self,
        segments: &[&str],
        file_field: &str,
        file: UploadFile,
        fields: Vec<(String, String)>,
    ) -> Result<UploadedAsset, ApiError> {
        let size = file.bytes.len();
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(ApiError::transport)?;

        let mut form = reqwest::multipart::Form::new().part(file_field.to_string(), part);
        for (name, value) in fields {
            form = form.text(name, value);
        }

        tracing::debug!("Uploading {} ({} bytes)", file.file_name, size);
        let request = self.request(Method::POST, segments).multipart(form);
        let (status, body) = self.execute(request).await?;
        decode_envelope(status, &body)
    }
}

/// `message`, then `error`, then `error.message`
fn body_message(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    for key in ["message", "error"] {
        match obj.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            Some(Value::Object(inner)) => {
                if let Some(Value::String(s)) = inner.get("message") {
                    return Some(s.clone());
                }
            }
            _ => {}
        }
    }
    None
}

/// `Some(false)` when the body is an explicit `{"success": false}`
fn success_flag(value: &Value) -> Option<bool> {
    value.as_object()?.get("success")?.as_bool()
}

fn rejected_in_body(status: u16, value: &Value) -> ApiError {
    ApiError::ServerRejected {
        status,
        message: body_message(value).unwrap_or_else(|| "request was not successful".to_string()),
    }
}

/// Decode either a bare value or a `{"success", "data"}` envelope
pub(crate) fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(ApiError::malformed)?;

    if success_flag(&value) == Some(false) {
        return Err(rejected_in_body(status, &value));
    }

    let payload = match value {
        Value::Object(mut obj) if obj.contains_key("success") && obj.contains_key("data") => {
            obj.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    serde_json::from_value(payload).map_err(ApiError::malformed)
}

/// Like `decode_envelope`, but a reply without a record is still a success
pub(crate) fn decode_optional<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<Option<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(body).map_err(ApiError::malformed)?;
    if success_flag(&value) == Some(false) {
        return Err(rejected_in_body(status, &value));
    }

    let payload = match value {
        Value::Object(mut obj) if obj.contains_key("success") => match obj.remove("data") {
            Some(data) if !data.is_null() => data,
            _ => return Ok(None),
        },
        other => other,
    };

    serde_json::from_value(payload)
        .map(Some)
        .map_err(ApiError::malformed)
}

pub(crate) fn decode_ack(status: u16, body: &str) -> Result<(), ApiError> {
    if body.trim().is_empty() {
        return Ok(());
    }
    let value: Value = serde_json::from_str(body).map_err(ApiError::malformed)?;
    match success_flag(&value) {
        Some(false) => Err(rejected_in_body(status, &value)),
        _ => Ok(()),
    }
}
