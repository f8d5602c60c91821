//! Entity types held by the admin console.
//!
//! Every collection here is a cache of server-owned records; nothing is
//! authoritative on the client.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod gallery;
pub mod lead;
pub mod post;

pub use gallery::{GalleryDraft, GalleryImage, GALLERY_CATEGORIES};
pub use lead::{Lead, LeadStatus};
pub use post::{BlogPost, Category, DraftStep, PostDraft};

/// Server-assigned record identifier.
///
/// The API returns numeric ids for some tables and string ids for others,
/// so both are accepted and kept in their textual form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Ok(EntityId(n.to_string())),
            RawId::Text(s) if !s.trim().is_empty() => Ok(EntityId(s)),
            RawId::Text(_) => Err(serde::de::Error::custom("empty id")),
        }
    }
}

/// A record that lives in a list view
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    fn id(&self) -> &EntityId;
}

/// Format a server date (`2024-06-15` or RFC 3339) as `15 Jun 2024`.
///
/// Unparseable input is returned unchanged.
pub fn format_display_date(raw: &str) -> String {
    match parse_server_date(raw) {
        Some(date) => date.format("%-d %b %Y").to_string(),
        None => raw.to_string(),
    }
}

pub(crate) fn parse_server_date(raw: &str) -> Option<chrono::NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    // Prefix covers "2024-06-15T00:00:00.000Z" variants chrono rejects
    raw.get(..10)
        .and_then(|prefix| chrono::NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// CSS class for a status badge; unknown statuses share the closed style
pub fn status_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "new" => "status-new",
        "contacted" | "pending" => "status-contacted",
        "converted" | "reviewed" => "status-converted",
        "draft" => "status-draft",
        "published" => "status-published",
        "active" => "status-active",
        "inactive" => "status-inactive",
        _ => "status-closed",
    }
}

/// Accepts a number, a numeric string, or null
pub(crate) fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts a string or null (null becomes empty)
pub(crate) fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
