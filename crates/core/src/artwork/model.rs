use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ArtworkId;

/// Whether an artwork shows up in public listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// Caller-owned artwork fields. Stored as the JSONB `content` column.
///
/// Every field is optional; absent fields are omitted when serialized so a
/// value of this type doubles as a shallow patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    /// Email of the user who submitted the artwork.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Wire names of [`ArtworkFields`], used for unknown-field checks.
pub const CALLER_FIELDS: [&str; 11] = [
    "title",
    "artistName",
    "artistEmail",
    "category",
    "visibility",
    "imageUrl",
    "description",
    "medium",
    "dimensions",
    "price",
    "tags",
];

/// Fields owned by the service. Never taken from a request body.
pub const SERVER_FIELDS: [&str; 4] = ["_id", "likes", "favorites", "createdAt"];

impl ArtworkFields {
    /// Serialize into a JSON object holding only the fields that are set.
    pub fn to_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Shallow merge: every field set in `patch` replaces the current value.
    pub fn apply(&mut self, patch: &ArtworkPatch) {
        let p = &patch.0;
        macro_rules! take {
            ($($field:ident),*) => {
                $(if let Some(v) = &p.$field { self.$field = Some(v.clone()); })*
            };
        }
        take!(
            title,
            artist_name,
            artist_email,
            category,
            visibility,
            image_url,
            description,
            medium,
            dimensions,
            price,
            tags
        );
    }
}

/// A validated set of fields to overwrite on an existing artwork.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtworkPatch(pub(crate) ArtworkFields);

impl ArtworkPatch {
    pub fn is_empty(&self) -> bool {
        self.0 == ArtworkFields::default()
    }

    pub fn to_object(&self) -> Map<String, Value> {
        self.0.to_object()
    }
}

/// A persisted artwork, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    #[serde(rename = "_id")]
    pub id: ArtworkId,
    #[serde(flatten)]
    pub fields: ArtworkFields,
    pub likes: u64,
    pub favorites: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Artwork {
    /// Build a fresh record: server-managed fields start from their initial
    /// values whatever the caller sent.
    pub fn create(fields: ArtworkFields, now: DateTime<Utc>) -> Self {
        Self {
            id: ArtworkId::generate(),
            fields,
            likes: 0,
            favorites: Vec::new(),
            created_at: now,
        }
    }
}
