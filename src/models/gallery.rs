//! Portfolio images shown on the public gallery page.

use serde::{Deserialize, Serialize};

use super::{null_as_empty, Entity, EntityId};

/// Categories offered by the uploader
pub const GALLERY_CATEGORIES: [&str; 3] = ["Wedding", "Birthday", "Corporate"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GalleryImage {
    pub id: EntityId,
    #[serde(alias = "imageUrl", alias = "url", alias = "image")]
    pub image_url: String,
    #[serde(
        alias = "type",
        alias = "categoryOrType",
        deserialize_with = "null_as_empty",
        default
    )]
    pub category: String,
    #[serde(alias = "createdAt", deserialize_with = "null_as_empty", default)]
    pub created_at: String,
}

impl Entity for GalleryImage {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Unsaved uploader state; the file itself travels separately
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryDraft {
    pub category: String,
}

impl Default for GalleryDraft {
    fn default() -> Self {
        Self {
            category: GALLERY_CATEGORIES[0].to_string(),
        }
    }
}
