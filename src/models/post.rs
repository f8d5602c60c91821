//! Blog posts and their categories.

use serde::{Deserialize, Serialize};

use super::{null_as_empty, Entity, EntityId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: EntityId,
    #[serde(alias = "title", alias = "category_name")]
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    pub id: EntityId,
    pub title: String,
    #[serde(alias = "categoryId", default)]
    pub category_id: Option<EntityId>,
    #[serde(alias = "shortContent", deserialize_with = "null_as_empty", default)]
    pub short_content: String,
    #[serde(deserialize_with = "null_as_empty", default)]
    pub content: String,
    #[serde(deserialize_with = "null_as_empty", default)]
    pub tag: String,
    #[serde(alias = "imageLink", deserialize_with = "null_as_empty", default)]
    pub image_link: String,
    #[serde(deserialize_with = "null_as_empty", default)]
    pub author: String,
    #[serde(deserialize_with = "null_as_empty", default)]
    pub attr: String,
    #[serde(deserialize_with = "null_as_empty", default)]
    pub language: String,
    #[serde(alias = "createdAt", deserialize_with = "null_as_empty", default)]
    pub created_at: String,
}

impl Entity for BlogPost {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Which half of the two-step authoring dialog is showing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DraftStep {
    #[default]
    Metadata,
    Content,
}

/// Unsaved post, buffered across both authoring steps and sent in one request
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub category_id: Option<EntityId>,
    pub short_content: String,
    pub content: String,
    pub tag: String,
    pub image_link: String,
    pub author: String,
    pub attr: String,
    pub language: String,
}

impl PostDraft {
    /// Prefill an edit dialog from an existing post
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            category_id: post.category_id.clone(),
            short_content: post.short_content.clone(),
            content: post.content.clone(),
            tag: post.tag.clone(),
            image_link: post.image_link.clone(),
            author: post.author.clone(),
            attr: post.attr.clone(),
            language: post.language.clone(),
        }
    }

    /// Missing metadata, if any; checked before moving to the content step
    pub fn metadata_problem(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            return Some("Title is required");
        }
        if self.category_id.is_none() {
            return Some("Choose a category");
        }
        None
    }

    /// Missing fields, if any; checked before submitting
    pub fn submit_problem(&self) -> Option<&'static str> {
        if let Some(problem) = self.metadata_problem() {
            return Some(problem);
        }
        if is_blank_rich_text(&self.content) {
            return Some("Content is required");
        }
        None
    }
}

/// The editor emits `<p><br></p>` for an empty document
fn is_blank_rich_text(html: &str) -> bool {
    let mut in_tag = false;
    let mut text = String::new();
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ").trim().is_empty()
}
