//! Write operations on artworks and the raw acknowledgements they return.
use serde::{Deserialize, Serialize};

use crate::artwork::ArtworkId;

/// What to do with a user's favorite mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteAction {
    Add,
    Remove,
}

/// Body of `PATCH /api/artworks/{id}/favorite`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub user_email: String,
    pub action: FavoriteAction,
}

/// Acknowledgement of an insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: ArtworkId,
}

impl InsertResult {
    pub fn new(inserted_id: ArtworkId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Acknowledgement of a single-document update.
///
/// `matched_count` is 0 when no artwork has the id; `modified_count` is 0
/// when the write left the document unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<ArtworkId>,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }

    pub fn unmatched() -> Self {
        Self::new(0, 0)
    }
}
