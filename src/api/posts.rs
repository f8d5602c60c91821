//! Blog posts and categories.
//!
//! `GET /posts`, `POST /posts`, `PUT /posts/{id}`, `DELETE /posts/{id}`,
//! `POST /posts/upload` (multipart cover image), `GET /posts/categories/all`

use async_trait::async_trait;
use reqwest::Method;

use super::traits::{BinaryUploader, DraftClient, EntityClient};
use super::{ApiClient, ApiError, UploadFile, UploadedAsset};
use crate::models::{BlogPost, Category, EntityId, PostDraft};

#[derive(Clone)]
pub struct PostsClient {
    api: ApiClient,
}

impl PostsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EntityClient for PostsClient {
    type Entity = BlogPost;

    fn family(&self) -> &'static str {
        "posts"
    }

    async fn list(&self) -> Result<Vec<BlogPost>, ApiError> {
        self.api.get_json(&["posts"]).await
    }

    async fn remove(&self, id: &EntityId) -> Result<(), ApiError> {
        self.api
            .send_ack::<()>(Method::DELETE, &["posts", id.as_str()], None)
            .await
    }
}

#[async_trait]
impl DraftClient for PostsClient {
    type Draft = PostDraft;

    async fn create(&self, draft: &PostDraft) -> Result<Option<BlogPost>, ApiError> {
        self.api.send_json(Method::POST, &["posts"], draft).await
    }

    async fn update(&self, id: &EntityId, draft: &PostDraft) -> Result<Option<BlogPost>, ApiError> {
        self.api
            .send_json(Method::PUT, &["posts", id.as_str()], draft)
            .await
    }
}

#[async_trait]
impl BinaryUploader for PostsClient {
    async fn upload_binary(
        &self,
        file: UploadFile,
        metadata: Vec<(String, String)>,
    ) -> Result<UploadedAsset, ApiError> {
        self.api
            .upload_multipart(&["posts", "upload"], "image", file, metadata)
            .await
    }
}

#[derive(Clone)]
pub struct CategoriesClient {
    api: ApiClient,
}

impl CategoriesClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        self.api.get_json(&["posts", "categories", "all"]).await
    }
}
