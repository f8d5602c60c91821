//! Seams between the list controller and the entity families.
//!
//! The controller only sees these traits, so it runs unchanged against the
//! live API or an in-memory fake.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

use super::{ApiError, UploadFile, UploadedAsset};
use crate::models::{Entity, EntityId};

/// Read and delete for one entity family
#[async_trait]
pub trait EntityClient: Send + Sync + 'static {
    type Entity: Entity;

    /// Family name for logs ("leads", "gallery", ...)
    fn family(&self) -> &'static str;

    async fn list(&self) -> Result<Vec<Self::Entity>, ApiError>;

    async fn remove(&self, id: &EntityId) -> Result<(), ApiError>;
}

/// Single-field status updates, applied optimistically by the controller
#[async_trait]
pub trait StatusClient: EntityClient {
    type Status: Clone + PartialEq + Debug + Display + Send + Sync + 'static;

    fn status_of(entity: &Self::Entity) -> Self::Status;

    fn set_status(entity: &mut Self::Entity, status: Self::Status);

    async fn update_status(&self, id: &EntityId, status: &Self::Status) -> Result<(), ApiError>;
}

/// Full-record create/update from a draft; confirmed before it is reflected
#[async_trait]
pub trait DraftClient: EntityClient {
    type Draft: Clone + Debug + Send + Sync + 'static;

    /// Returns the stored record when the server echoes it back
    async fn create(&self, draft: &Self::Draft) -> Result<Option<Self::Entity>, ApiError>;

    async fn update(
        &self,
        id: &EntityId,
        draft: &Self::Draft,
    ) -> Result<Option<Self::Entity>, ApiError>;
}

/// Multipart transfer of a prepared file
#[async_trait]
pub trait BinaryUploader: Send + Sync {
    async fn upload_binary(
        &self,
        file: UploadFile,
        metadata: Vec<(String, String)>,
    ) -> Result<UploadedAsset, ApiError>;
}
