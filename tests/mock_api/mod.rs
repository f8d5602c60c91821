//! Mock photobooth REST API for integration testing
//!
//! Serves the backend's routes and reply shapes from in-memory records.
//! Any route can be told to fail with a 500, and a bearer token can be
//! required on every protected route.

#![allow(dead_code)]

use axum::{
    extract::{Multipart, Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "mock-token-123";

/// Route keys accepted by `fail` and `recover`
pub mod routes {
    pub const LOGIN: &str = "auth.login";
    pub const LEADS_LIST: &str = "leads.list";
    pub const LEADS_STATUS: &str = "leads.status";
    pub const LEADS_DELETE: &str = "leads.delete";
    pub const GALLERY_LIST: &str = "gallery.list";
    pub const GALLERY_UPLOAD: &str = "gallery.upload";
    pub const GALLERY_DELETE: &str = "gallery.delete";
    pub const POSTS_LIST: &str = "posts.list";
    pub const POSTS_CREATE: &str = "posts.create";
    pub const POSTS_UPDATE: &str = "posts.update";
    pub const POSTS_DELETE: &str = "posts.delete";
    pub const POSTS_UPLOAD: &str = "posts.upload";
    pub const CATEGORIES: &str = "posts.categories";
}

/// One multipart request as the server received it
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub route: &'static str,
    pub file_field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
    pub fields: Vec<(String, String)>,
}

#[derive(Default)]
struct MockApiState {
    leads: Vec<Value>,
    gallery: Vec<Value>,
    posts: Vec<Value>,
    categories: Vec<Value>,
    next_id: i64,
    failing: HashSet<&'static str>,
    /// Malformed 2xx bodies instead of records
    garbled: HashSet<&'static str>,
    stalled: HashMap<&'static str, Duration>,
    /// Token handed out by `/auth/login` in place of `TOKEN`
    issued_token: Option<String>,
    required_token: Option<String>,
    authorizations: Vec<Option<String>>,
    status_updates: Vec<(String, String)>,
    uploads: Vec<RecordedUpload>,
}

impl MockApiState {
    fn issue_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<RwLock<MockApiState>>;

/// Mock REST API
pub struct MockApi {
    addr: SocketAddr,
    state: Shared,
    handle: JoinHandle<()>,
}

impl MockApi {
    /// Start an empty mock API on a random port
    pub async fn start() -> Self {
        let state: Shared = Arc::new(RwLock::new(MockApiState {
            next_id: 1000,
            categories: vec![
                json!({"id": 1, "name": "Weddings"}),
                json!({"id": 2, "name": "Corporate"}),
            ],
            ..MockApiState::default()
        }));

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/leads", get(list_leads))
            .route("/api/leads/{id}/status", patch(update_lead_status))
            .route("/api/leads/{id}", delete(delete_lead))
            .route("/api/gallery", get(list_gallery).post(upload_gallery))
            .route("/api/gallery/{id}", delete(delete_gallery))
            .route("/api/posts", get(list_posts).post(create_post))
            .route("/api/posts/{id}", put(update_post).delete(delete_post))
            .route("/api/posts/categories/all", get(list_categories))
            .route("/api/posts/upload", post(upload_post_image))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// API base URL, including the `/api` prefix the backend mounts under
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Seed `count` leads with ids 1..=count, all `New`
    pub async fn seed_leads(&self, count: i64) {
        let mut state = self.state.write().await;
        state.leads = (1..=count).map(lead).collect();
    }

    pub async fn add_gallery_image(&self, id: i64, category: &str) {
        let mut state = self.state.write().await;
        state.gallery.push(json!({
            "id": id,
            "imageUrl": format!("https://cdn.mock/gallery/{id}.jpg"),
            "type": category,
            "createdAt": "2026-03-01T09:00:00Z"
        }));
    }

    pub async fn add_post(&self, id: i64, title: &str) {
        let mut state = self.state.write().await;
        state.posts.push(json!({
            "id": id,
            "title": title,
            "categoryId": 1,
            "shortContent": "Summary",
            "content": "<p>Body</p>",
            "author": "Admin",
            "createdAt": "2026-02-01T09:00:00Z"
        }));
    }

    /// Make a route answer 500 until `recover` is called
    pub async fn fail(&self, route: &'static str) {
        self.state.write().await.failing.insert(route);
    }

    pub async fn recover(&self, route: &'static str) {
        self.state.write().await.failing.remove(route);
    }

    /// Make a route answer 200 with a body that is not JSON
    pub async fn garble(&self, route: &'static str) {
        self.state.write().await.garbled.insert(route);
    }

    /// Hold every reply on a route for `delay` before answering
    pub async fn stall(&self, route: &'static str, delay: Duration) {
        self.state.write().await.stalled.insert(route, delay);
    }

    /// Answer a successful login with `token` instead of `TOKEN`
    pub async fn issue_token(&self, token: &str) {
        self.state.write().await.issued_token = Some(token.to_string());
    }

    /// Reject protected routes whose bearer token is not `token`
    pub async fn require_token(&self, token: &str) {
        self.state.write().await.required_token = Some(token.to_string());
    }

    /// `Authorization` header of every protected request, in order
    pub async fn authorizations(&self) -> Vec<Option<String>> {
        self.state.read().await.authorizations.clone()
    }

    pub async fn lead_status(&self, id: i64) -> Option<String> {
        let state = self.state.read().await;
        state
            .leads
            .iter()
            .find(|l| id_of(l) == id.to_string())
            .and_then(|l| l["status"].as_str().map(str::to_string))
    }

    pub async fn lead_count(&self) -> usize {
        self.state.read().await.leads.len()
    }

    pub async fn gallery_count(&self) -> usize {
        self.state.read().await.gallery.len()
    }

    pub async fn posts(&self) -> Vec<Value> {
        self.state.read().await.posts.clone()
    }

    pub async fn status_updates(&self) -> Vec<(String, String)> {
        self.state.read().await.status_updates.clone()
    }

    pub async fn uploads(&self) -> Vec<RecordedUpload> {
        self.state.read().await.uploads.clone()
    }

    /// Stop the mock server
    pub async fn stop(self) {
        self.handle.abort();
    }
}

fn lead(id: i64) -> Value {
    json!({
        "id": id,
        "customerName": format!("Customer {id}"),
        "email": format!("customer{id}@example.com"),
        "phoneNumber": "07700 900000",
        "eventDate": "2026-06-13",
        "eventTime": "18:00",
        "eventPostcode": "SW1A 1AA",
        "numberOfGuests": "120",
        "boothChoice": "Magic Mirror",
        "eventType": "Wedding",
        "status": "New",
        "createdAt": "2026-05-01T10:00:00Z"
    })
}

/// Record ids arrive as numbers or strings
fn id_of(record: &Value) -> String {
    match &record["id"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"success": false, "message": message}))).into_response()
}

fn ok(data: Value) -> Response {
    Json(json!({"success": true, "data": data})).into_response()
}

fn ack() -> Response {
    Json(json!({"success": true})).into_response()
}

/// Sleep for the route's configured stall, without holding the state lock
async fn pause(state: &Shared, route: &'static str) {
    let delay = state.read().await.stalled.get(route).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

/// Shared gate for protected routes: record the header, apply injected
/// failures, then check the token
fn admit(state: &mut MockApiState, headers: &HeaderMap, route: &'static str) -> Result<(), Response> {
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.authorizations.push(presented.clone());

    if state.failing.contains(route) {
        return Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"));
    }
    if state.garbled.contains(route) {
        return Err((StatusCode::OK, "<html>maintenance</html>").into_response());
    }
    if let Some(expected) = &state.required_token {
        let bearer = presented.as_deref().and_then(|v| v.strip_prefix("Bearer "));
        if bearer != Some(expected.as_str()) {
            return Err(reject(StatusCode::UNAUTHORIZED, "Unauthorized"));
        }
    }
    Ok(())
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    pause(&state, routes::LOGIN).await;
    let state = state.read().await;
    if state.failing.contains(routes::LOGIN) {
        return reject(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }
    if body["username"] == USERNAME && body["password"] == PASSWORD {
        ok(json!({
            "user": {"id": 1, "username": USERNAME},
            "token": state.issued_token.as_deref().unwrap_or(TOKEN)
        }))
    } else {
        reject(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

async fn list_leads(State(state): State<Shared>, headers: HeaderMap) -> Response {
    pause(&state, routes::LEADS_LIST).await;
    let mut state = state.write().await;
    if let Err(resp) = admit(&mut state, &headers, routes::LEADS_LIST) {
        return resp;
    }
    ok(Value::Array(state.leads.clone()))
}

async fn update_lead_status(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = admit(&mut state, &headers, routes::LEADS_STATUS) {
        return resp;
    }
    let status = body["status"].as_str().unwrap_or_default().to_string();
    let Some(lead) = state.leads.iter_mut().find(|l| id_of(l) == id) else {
        return reject(StatusCode::NOT_FOUND, "Lead not found");
    };
    lead["status"] = Value::String(status.clone());
    state.status_updates.push((id, status));
    ack()
}

async fn delete_lead(State(state): State<Shared>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = admit(&mut state, &headers, routes::LEADS_DELETE) {
        return resp;
    }
    let before = state.leads.len();
    state.leads.retain(|l| id_of(l) != id);
    if state.leads.len() == before {
        return reject(StatusCode::NOT_FOUND, "Lead not found");
    }
    ack()
}

async fn list_gallery(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = admit(&mut state, &headers, routes::GALLERY_LIST) {
        return resp;
    }
    ok(Value::Array(state.gallery.clone()))
}

/// Drain a multipart body into a `RecordedUpload`; the first part with a
/// file name is the file
async fn record_multipart(route: &'static str, mut multipart: Multipart) -> RecordedUpload {
    let mut upload = RecordedUpload {
        route,
        file_field: String::new(),
        file_name: None,
        content_type: None,
        size: 0,
        fields: Vec::new(),
    };
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if upload.file_name.is_none() && field.file_name().is_some() {
            upload.file_name = field.file_name().map(str::to_string);
            upload.content_type = field.content_type().map(str::to_string);
            upload.size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
            upload.file_field = name;
        } else {
            let value = field.text().await.unwrap_or_default();
            upload.fields.push((name, value));
        }
    }
    upload
}

async fn upload_gallery(State(state): State<Shared>, headers: HeaderMap, multipart: Multipart) -> Response {
    {
        let mut state = state.write().await;
        if let Err(resp) = admit(&mut state, &headers, routes::GALLERY_UPLOAD) {
            return resp;
        }
    }
    let upload = record_multipart(routes::GALLERY_UPLOAD, multipart).await;

    let mut state = state.write().await;
    let id = state.issue_id();
    let file_name = upload.file_name.clone().unwrap_or_default();
    let url = format!("https://cdn.mock/gallery/{file_name}");
    let category = upload
        .fields
        .iter()
        .find(|(name, _)| name == "category")
        .map(|(_, value)| value.clone())
        .unwrap_or_default();
    state.gallery.push(json!({"id": id, "imageUrl": url, "type": category}));
    state.uploads.push(upload);
    ok(json!({"id": id, "imageUrl": url}))
}

async fn delete_gallery(State(state): State<Shared>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = admit(&mut state, &headers, routes::GALLERY_DELETE) {
        return resp;
    }
    state.gallery.retain(|g| id_of(g) != id);
    ack()
}

/// Posts come back bare, without the envelope
async fn list_posts(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = admit(&mut state, &headers, routes::POSTS_LIST) {
        return resp;
    }
    Json(Value::Array(state.posts.clone())).into_response()
}

async fn create_post(State(state): State<Shared>, headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = admit(&mut state, &headers, routes::POSTS_CREATE) {
        return resp;
    }
    body["id"] = json!(state.issue_id());
    state.posts.push(body.clone());
    ok(body)
}

async fn update_post(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = admit(&mut state, &headers, routes::POSTS_UPDATE) {
        return resp;
    }
    let Some(post) = state.posts.iter_mut().find(|p| id_of(p) == id) else {
        return reject(StatusCode::NOT_FOUND, "Post not found");
    };
    if let (Some(target), Some(fields)) = (post.as_object_mut(), body.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    ack()
}

async fn delete_post(State(state): State<Shared>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = admit(&mut state, &headers, routes::POSTS_DELETE) {
        return resp;
    }
    state.posts.retain(|p| id_of(p) != id);
    ack()
}

async fn list_categories(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = admit(&mut state, &headers, routes::CATEGORIES) {
        return resp;
    }
    ok(Value::Array(state.categories.clone()))
}

async fn upload_post_image(State(state): State<Shared>, headers: HeaderMap, multipart: Multipart) -> Response {
    {
        let mut state = state.write().await;
        if let Err(resp) = admit(&mut state, &headers, routes::POSTS_UPLOAD) {
            return resp;
        }
    }
    let upload = record_multipart(routes::POSTS_UPLOAD, multipart).await;
    let file_name = upload.file_name.clone().unwrap_or_default();
    state.write().await.uploads.push(upload);
    ok(json!({"url": format!("https://cdn.mock/posts/{file_name}")}))
}
