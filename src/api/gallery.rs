//! Gallery: `GET /gallery`, `POST /gallery` (multipart), `DELETE /gallery/{id}`

use async_trait::async_trait;
use reqwest::Method;

use super::traits::{BinaryUploader, EntityClient};
use super::{ApiClient, ApiError, UploadFile, UploadedAsset};
use crate::models::{EntityId, GalleryImage};

#[derive(Clone)]
pub struct GalleryClient {
    api: ApiClient,
}

impl GalleryClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EntityClient for GalleryClient {
    type Entity = GalleryImage;

    fn family(&self) -> &'static str {
        "gallery"
    }

    async fn list(&self) -> Result<Vec<GalleryImage>, ApiError> {
        self.api.get_json(&["gallery"]).await
    }

    async fn remove(&self, id: &EntityId) -> Result<(), ApiError> {
        self.api
            .send_ack::<()>(Method::DELETE, &["gallery", id.as_str()], None)
            .await
    }
}

/// Creates the gallery entry; `metadata` carries the `category` field
#[async_trait]
impl BinaryUploader for GalleryClient {
    async fn upload_binary(
        &self,
        file: UploadFile,
        metadata: Vec<(String, String)>,
    ) -> Result<UploadedAsset, ApiError> {
        self.api
            .upload_multipart(&["gallery"], "image", file, metadata)
            .await
    }
}
